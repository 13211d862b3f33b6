use serde::{Deserialize, Serialize};

// IPO source envelope: {"data": {"items": [...]}}.
#[derive(Debug, Clone, Deserialize)]
pub struct IpoListEnvelope {
    pub data: IpoListData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpoListData {
    #[serde(default)]
    pub items: Vec<IpoRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpoRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ipo_type_tag: String,
    #[serde(default)]
    pub issue_start_date: String,
    #[serde(default)]
    pub issue_end_date: String,
}

// The grey-market-premium source publishes display-oriented keys
// ("~ipo_name" style), hence the renames.
#[derive(Debug, Clone, Deserialize)]
pub struct GmpReport {
    #[serde(rename = "reportTableData", default)]
    pub report_table_data: Vec<GmpRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GmpRow {
    #[serde(rename = "~ipo_name", default)]
    pub ipo_name: String,
    #[serde(rename = "~gmp_percent_calc", default)]
    pub gmp_percent: String,
    // May embed markup after the date; consumers truncate at the first '<'.
    #[serde(rename = "Close", default)]
    pub close: String,
}
