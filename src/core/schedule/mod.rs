pub mod interval_scheduler;
pub mod monthly_trigger;
pub mod overdue_reconciler;
