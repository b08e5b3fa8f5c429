// --- Backend ---
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const LICENSE_PARAMS_PATH: &str = "/license_params";
pub const LICENSE_PULL_REQUEST_PATH: &str = "/license_pull_request";
pub const LICENSE_KEY_QUERY: &str = "key";

pub const GITHUB_TOKEN_HEADER: &str = "X-GITHUB-TOKEN";
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

// --- Page contract ---
// Body attribute holding the access token, read fresh before every request.
pub const TOKEN_ATTRIBUTE: &str = "data-github-token";

pub const LICENSE_SELECTOR_ID: &str = "license";
pub const LICENSE_INPUTS_ID: &str = "licenseInputs";
pub const SUBMIT_TRIGGER_NAME: &str = "sendLicensePr";
pub const PARAM_INPUT_NAME: &str = "param";

pub const SPINNER_SRC: &str =
    "/assets/lib/salesforce-lightning-design-system/assets/images/spinners/slds_spinner.gif";
pub const SPINNER_STYLE: &str = "width: 16px; vertical-align: top";

pub const PULL_REQUEST_LINK_PREFIX: &str = "PR #";

// --- Submission payload ---
pub const ORG_REPO_FIELD: &str = "orgRepo";
pub const LICENSE_KEY_FIELD: &str = "licenseKey";

// --- Config ---
pub const CONFIG_DIR_NAME: &str = "licensepr";
pub const DEFAULT_CONFIG_FILENAME: &str = "config.yml";

// --- Parameter defaults ---
// Parameter filled with the current year when the user leaves it out.
pub const YEAR_PARAM: &str = "year";
