mod report_vm;

pub use report_vm::ReportDashboardVm;
