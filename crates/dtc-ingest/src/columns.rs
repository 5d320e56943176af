//! Column headers of the source spreadsheets.
//!
//! Headers are matched after normalization, so punctuation and letter variants
//! in the files do not matter.

pub const DEALER_NAME: &str = "عنوان نمایندگی";
pub const PERSONNEL_CODE: &str = "کد پرسنلی";
pub const FULL_NAME: &str = "نام و نام خانوادگی";
pub const COMPANY: &str = "company";
pub const MAIN_POSITION: &str = "عنوان شغل";
pub const ALTERNATE_POSITIONS: &str = "شغل موازی (ارتقا)";
pub const PASSED_COURSE: &str = "عنوان دوره";

pub const JOB_POST: &str = "پست کاری";
pub const VEHICLE: &str = "نام خودرو";
pub const CRITERION: &str = "نام سرفصل";
pub const REQUIRED_COURSE: &str = "نام دوره آموزشی";

/// Columns whose values lose all internal whitespace during sanitization.
pub const COURSE_COLUMNS: &[&str] = &[REQUIRED_COURSE, PASSED_COURSE];

/// First category-flag column of the dealer table (column D).
pub const CATEGORY_FLAGS_START: usize = 3;
/// End (exclusive) of the category-flag columns (column AV inclusive).
pub const CATEGORY_FLAGS_END: usize = 48;
/// Cell value marking a category as authorized.
pub const AUTHORIZED_FLAG: &str = "p";
