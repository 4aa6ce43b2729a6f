//! Common constants shared by the client, the classifier and the scenarios

/// Login endpoint, relative to the configured base URL
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Super-admin create/update endpoint
pub const CREATE_UPDATE_SUPER_ADMIN_PATH: &str = "/api/users/createupdatesuperadmin";

/// Client onboarding endpoint
pub const ADD_CLIENT_PATH: &str = "/api/Client/addclient";

/// Card issuance endpoint
pub const ISSUE_CARD_PATH: &str = "/api/card/issuecard";

/// Header carrying the platform API key
pub const API_KEY_HEADER: &str = "apikey";

/// A session token must be strictly longer than this to be considered usable
pub const MIN_TOKEN_LENGTH: usize = 20;

/// Number of token characters that may appear in logs
pub const TOKEN_PREVIEW_LENGTH: usize = 10;

/// Role reported by login for the suite's credential pair
pub const SUPER_ADMIN_ROLE: &str = "Super admin";

/// Rejection message for cards issued against an inactive client
pub const CLIENT_NOT_ACTIVE_MESSAGE: &str = "Client is not active in PayCaddy";

/// Rejection message once a client's card quota is used up
pub const CARD_LIMIT_EXCEEDED_MESSAGE: &str = "Issue Card Limit Exceeded";

/// Domain used for every generated e-mail address
pub const GENERATED_EMAIL_DOMAIN: &str = "yopmail.com";

/// Unregistered address used to provoke an invalid-credentials rejection
pub const UNKNOWN_LOGIN_EMAIL: &str = "invalid@example.com";

/// Wrong password paired with the configured login e-mail
pub const WRONG_PASSWORD: &str = "wrongpassword123";

/// Value sent in place of the configured API key
pub const INVALID_API_KEY: &str = "invalid-api-key";

/// Date of birth in DD-MM-YYYY, which the card endpoint should refuse
pub const MALFORMED_DATE_OF_BIRTH: &str = "05-02-2007";
