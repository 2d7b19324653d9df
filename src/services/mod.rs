pub mod completion_service;
pub mod docx_service;
pub mod prompt_service;
pub mod report_service;
