use crate::domain::Permission;

const CLIENT_ADMIN_CLAIMS: [(&str, &str); 12] = [
    ("8c90b441-1eef-47b6-9715-44b34e9782ff", "Load Card"),
    ("f733e2e4-9195-4327-91c8-7a549e7b64e0", "Issue Virtual Card"),
    ("3ec2fa51-f5a8-4ebd-8062-95fbca8bf287", "Issue Physical Card"),
    ("f8bbe66c-9b82-4dc0-8103-a3d10565ae96", "Suspend Card"),
    ("5b1d48bf-40ed-4dc8-be32-42fa39a60b2e", "View Ledger Balance"),
    ("6dc8feed-89e8-4186-a659-24faea0accce", "View Ledger History"),
    ("d64882a2-f68c-401b-8869-ab82d2627fa8", "View CardHolder Transactions"),
    ("6693515c-99c4-433b-9366-97747bc1c0e9", "View Cardholder KYC"),
    ("17060152-d24e-4a6c-83c8-b3e52866cd30", "Debit Fund"),
    ("efd42ed9-b5b8-48b9-8342-a66ac5b4439c", "Update Cardholder Info"),
    ("736174e3-8893-4d24-9eff-95fdf9fa5695", "Card to Card Transfer"),
    ("334a4b46-7e97-46fc-9e46-a5a74f767831", "User KYC"),
];

/// Request body for `addclient`.
#[derive(serde::Serialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct NewClient {
    pub client_name: String,
    pub num_of_registration: String,
    #[serde(rename = "RUC")]
    pub ruc: String,
    pub kind_of_business: String,
    pub home_number: String,
    pub region: String,
    pub mobile: String,
    pub email: String,
    pub prefund_amount: i64,
    pub point_of_contact: String,
    pub logo_url: String,
    pub client_status_id: i64,
    pub permissions: Vec<Permission>,
    pub rolename: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country_code: String,
    pub payment_processor_id: i64,
    pub card_limit: i64,
    pub primary_color_code: String,
    pub secondary_color_code: String,
    pub color_primarylighter1: String,
    pub color_primarylighter2: String,
    pub currency_code: String,
    // Misspelt on the platform side
    pub refrence_email: String,
    pub card_flow: String,
    pub issuer_category: String,
    pub account_type: String,
    pub card_visa_master: String,
}

impl NewClient {
    pub fn fixture(email: String) -> Self {
        Self {
            client_name: "Client".into(),
            num_of_registration: "APP165troon".into(),
            ruc: "P164".into(),
            kind_of_business: "Fintech".into(),
            home_number: "I 94".into(),
            region: "Nearpotohar".into(),
            mobile: "12162007917".into(),
            email,
            prefund_amount: 1,
            point_of_contact: "Umairaslam".into(),
            logo_url: "https://sovpay-dev-temp.s3.amazonaws.com/sovpay-dev-temp/ProfileImages/36a24bd4-647e-47c4-99ca-ef4d536a5fce.png".into(),
            client_status_id: 1,
            permissions: Permission::list(&CLIENT_ADMIN_CLAIMS),
            rolename: "Client admin".into(),
            address: "MCP server - Trron tech".into(),
            city: "Islamabad".into(),
            zip_code: "54321".into(),
            country_code: "PK".into(),
            payment_processor_id: 3,
            card_limit: 50,
            primary_color_code: "#f30505".into(),
            secondary_color_code: "#c400c4".into(),
            color_primarylighter1: "#137100".into(),
            color_primarylighter2: "#3300a7".into(),
            currency_code: "USD".into(),
            refrence_email: String::new(),
            card_flow: "CREDIT".into(),
            issuer_category: "IssuerP".into(),
            account_type: "ExternalAccounts".into(),
            card_visa_master: "Master".into(),
        }
    }
}
