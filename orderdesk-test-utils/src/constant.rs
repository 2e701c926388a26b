//! Shared constants for test fixtures.

/// Username used by the default user fixture.
pub static TEST_USERNAME: &str = "operator";

/// Plain-text password used by the default user fixture.
pub static TEST_PASSWORD: &str = "correct-horse";

/// Avatar filename assigned to fixture users.
pub static TEST_AVATAR: &str = "default_avatar.png";

/// Spreadsheet headers in the order staff exports use them.
pub static SHEET_HEADERS: [&str; 5] = ["供应商名称", "客户名称", "金额", "发放时间", "电话"];
