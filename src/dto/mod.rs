pub mod analyze_dto;
