use report_core::model::ReportViewModel;
use serde::Deserialize;
use serde_json::Value;

/// Dashboard fields as the report template consumes them.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ReportDashboardVm {
    #[serde(rename = "averagepercentage")]
    pub average_percentage: String,
    #[serde(rename = "roundedaverage")]
    pub rounded_average: u8,
    #[serde(rename = "showdashboard")]
    pub show_dashboard: bool,
}

impl ReportDashboardVm {
    /// Read the dashboard fields out of a template context.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if a field is missing or has the wrong type.
    pub fn from_context(context: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(context)
    }
}

impl From<&ReportViewModel> for ReportDashboardVm {
    fn from(vm: &ReportViewModel) -> Self {
        Self {
            average_percentage: vm.average_label(),
            rounded_average: vm.rounded_average(),
            show_dashboard: vm.show_dashboard(),
        }
    }
}
