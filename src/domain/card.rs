/// Cardholder and card attributes for `issuecard`.
#[derive(serde::Serialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct CardIssuance {
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
    pub employee_id: String,
    pub gender: String,
    pub date_of_birth: String,
    pub email: String,
    pub mobile: String,
    pub nationality: String,
    pub delivery_address1: String,
    pub delivery_city: String,
    pub delivery_zip_code: String,
    pub billing_address1: String,
    pub billing_city: String,
    pub billing_zip_code: String,
    #[serde(rename = "cardFeeCurrencyCode")]
    pub card_fee_currency_code: String,
    #[serde(rename = "cardType")]
    pub card_type: String,
    pub country_code: String,
    #[serde(rename = "cardIssuanceAction")]
    pub card_issuance_action: String,
    pub billing_country: String,
    pub delivery_country: String,
    pub delivery_mode: String,
    pub client_id: i64,
    pub spending_limits: i64,
    pub billing_state: String,
    pub delivery_state: String,
    pub card_color: String,
    pub card_visa_master: String,
}

impl CardIssuance {
    pub fn fixture(client_id: i64, email: String) -> Self {
        Self {
            first_name: "Automation".into(),
            last_name: "card".into(),
            preferred_name: "random".into(),
            employee_id: "App5648".into(),
            gender: "Male".into(),
            date_of_birth: "2007-05-02".into(),
            email,
            mobile: "12356581815".into(),
            nationality: "GB".into(),
            delivery_address1: "Troon labs".into(),
            delivery_city: "Islamabad".into(),
            delivery_zip_code: "165488".into(),
            billing_address1: "Troon labs".into(),
            billing_city: "Islamabad".into(),
            billing_zip_code: "165488".into(),
            card_fee_currency_code: "USD".into(),
            card_type: "GPR_VIR".into(),
            country_code: "GB".into(),
            card_issuance_action: "NEW".into(),
            billing_country: "AF".into(),
            delivery_country: "AF".into(),
            delivery_mode: String::new(),
            client_id,
            spending_limits: 5000,
            billing_state: "AF".into(),
            delivery_state: "AF".into(),
            card_color: "Green".into(),
            card_visa_master: "Master".into(),
        }
    }
}
