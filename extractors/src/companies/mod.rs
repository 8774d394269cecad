mod roles;
mod ticker;

pub use roles::{pick_companies, strip_dateline, RoleCompanyExtractor};
pub use ticker::{companies_in_sentence, TickerCompanyExtractor};
