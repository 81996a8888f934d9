pub mod history_panel;
pub mod prediction_form;
pub mod result_panel;
