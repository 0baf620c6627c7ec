pub const APP_NAME: &str = "Webex";
pub const APP_URL: &str = "https://web.webex.com/";

pub const LAUNCHER_NAME: &str = "webex.sh";
pub const DESKTOP_FILE: &str = "webex.desktop";
pub const ICON_NAME: &str = "webex";
pub const MIME_PACKAGE: &str = "webex.xml";

pub const DEFAULT_INSTALL_DIR: &str = "/opt/webex";
pub const DEFAULT_APP_DIR: &str = "/opt/webex/app";

pub const ICON_URL: &str =
    "https://www.webex.com/content/dam/wbx/us/images/icons/webex-icon-256.png";
pub const ICON_FALLBACK_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/9/93/Webex_by_Cisco_logo.svg/256px-Webex_by_Cisco_logo.svg.png";

pub const ICON_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

// Written to the temp workdir when both icon fetches fail and ImageMagick
// is not available to synthesize one.
pub const PLACEHOLDER_ICON: &[u8] = include_bytes!("../assets/placeholder-icon.png");

pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const BACKGROUND_COLOR: &str = "#202124";

// Navigation outside these hosts opens in the default browser instead.
pub const INTERNAL_URLS: &str = r".*(webex|wbx2|ciscospark)\.com.*";

pub const BROWSER_WINDOW_OPTIONS: &str = r#"{"webPreferences":{"nodeIntegration":false,"contextIsolation":true,"enableRemoteModule":false,"webSecurity":true,"allowRunningInsecureContent":false}}"#;

// URI schemes dispatched to the app (meeting links and cross-launch links).
pub const SCHEMES: [&str; 2] = ["webex", "wbx"];

pub const NVM_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/nvm-sh/nvm/v0.39.7/install.sh";
