use crate::constants::SUPER_ADMIN_ROLE;
use crate::domain::Permission;

const SUPER_ADMIN_CLAIMS: [(&str, &str); 11] = [
    ("6ca16283-7229-4cf9-b6ea-36c52f8f29f5", "Ledger Transfer"),
    ("054b6017-3ea4-4613-b969-d57cf6339d29", "Issue Card"),
    ("c9b3d899-014b-4ac0-a1bb-21d2533cd788", "Deposit Tab"),
    ("160420db-c478-4ce6-bb3d-88323235c49b", "Load Card"),
    ("649c5e1d-37e7-48cd-8075-8aba15876487", "Create Client"),
    ("1bb1b5c6-11d3-4f50-a4c6-da54169636df", "Admin Role Management"),
    ("17718bd1-f5a0-4963-ba88-67551bd271b1", "Debit Fund"),
    ("ce7b769f-12c6-4278-95fb-1f802b5bbb04", "Suspend Card"),
    ("8e11318a-7dae-4f4a-a048-5bf572fddfc8", "View ledger history"),
    ("46a3bd5d-9adc-496c-8f56-eeae05778be0", "View ledger balance"),
    ("25ba6658-cc00-40d1-9c96-9f7c1b6a897c", "Update Cardholder Info"),
];

/// Request body for `createupdatesuperadmin`.
#[derive(serde::Serialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct SuperAdmin {
    pub client_id: i64,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    #[serde(rename = "DateofBirth")]
    pub date_of_birth: String,
    pub phone_number: String,
    pub password: String,
    pub is_active: bool,
    pub is_email_confirmed: bool,
    pub permissions: Vec<Permission>,
}

impl SuperAdmin {
    pub fn fixture(client_id: i64, email: String) -> Self {
        Self {
            client_id,
            role: SUPER_ADMIN_ROLE.to_string(),
            first_name: "Automation".into(),
            last_name: "-ran-".into(),
            email,
            address: "MCP server - Troon tech - Islamabad".into(),
            date_of_birth: "2007-05-01T19:00:00.000Z".into(),
            phone_number: "12162007917".into(),
            password: "Test_54321".into(),
            is_active: true,
            is_email_confirmed: true,
            permissions: Permission::list(&SUPER_ADMIN_CLAIMS),
        }
    }
}
