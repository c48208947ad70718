pub mod assessment_form;
pub mod export_buttons;
pub mod header;
pub mod loading_overlay;
pub mod report_template;
