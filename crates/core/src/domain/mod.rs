pub mod briefing;
pub mod concentration;
