//! Application-wide constants

/// Page size for server-side paginated listings
pub const PAGE_SIZE: u64 = 10;

pub const PACKAGES_BUCKET: &str = "packages";
pub const WORKFLOWS_BUCKET: &str = "workflows";

/// Signed package download links expire after this many seconds
pub const DOWNLOAD_URL_TTL_SECONDS: u64 = 60;

/// Cache-Control max-age sent with uploaded objects
pub const UPLOAD_CACHE_CONTROL: &str = "3600";

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;
pub const GIB: u64 = 1024 * MIB;

pub const MAX_PACKAGE_SIZE: u64 = GIB;
pub const MAX_VIDEO_SIZE: u64 = 200 * MIB;
pub const MAX_IMAGE_SIZE: u64 = 10 * MIB;

pub const TABLE_MENUS: &str = "menus";
pub const TABLE_ROLE_MENUS: &str = "role_menus";
pub const TABLE_USER_ROLES: &str = "user_roles";
pub const TABLE_PROFILES: &str = "profiles";
pub const TABLE_PACKAGES: &str = "packages";
pub const TABLE_WORKFLOWS: &str = "workflows";
pub const TABLE_USER_FLOWS: &str = "user_flows";

pub const DEFAULT_PROFILE_STATUS: &str = "active";
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
