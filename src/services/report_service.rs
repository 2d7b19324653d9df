use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::Result;
use crate::models::answer::AnalysisRequest;
use crate::models::report::{Paragraph, Report, ReportBuilder, Run, Section, SectionKind};
use crate::services::docx_service::DocxService;

pub const REPORT_TITLE: &str = "Результат анализа психологической анкеты";
const ANSWERS_HEADING: &str = "Ответы респондента:";
const ANALYSIS_HEADING: &str = "Анализ:";
const TITLE_SIZE: u32 = 28;

pub struct ReportService;

impl ReportService {
    /// Title, then one section per answer, then the analysis split into paragraphs.
    pub fn assemble(request: &AnalysisRequest, analysis: &str) -> Report {
        let mut builder = ReportBuilder::new(REPORT_TITLE);

        builder.append_section(
            Section::new(SectionKind::Title)
                .push(Paragraph::from_run(Run::bold(REPORT_TITLE).with_size(TITLE_SIZE)))
                .push(Paragraph::blank())
                .push(Paragraph::from_run(Run::bold(ANSWERS_HEADING))),
        );

        match request {
            AnalysisRequest::Answers(answers) => {
                for a in answers {
                    builder.append_section(
                        Section::new(SectionKind::QuestionAnswer)
                            .push(Paragraph::from_run(Run::bold(a.question.as_str())))
                            .push(Paragraph::text(format!("Ответ: {}", a.answer)))
                            .push(Paragraph::blank()),
                    );
                }
            }
            AnalysisRequest::RawText(text) => {
                builder.append_section(
                    Section::new(SectionKind::RawText)
                        .extend(non_empty_lines(text).map(Paragraph::text)),
                );
            }
        }

        builder.append_section(
            Section::new(SectionKind::Analysis)
                .push(Paragraph::blank())
                .push(Paragraph::from_run(Run::bold(ANALYSIS_HEADING)))
                .extend(non_empty_lines(analysis).map(Paragraph::text)),
        );

        builder.build()
    }

    pub fn render_base64(report: &Report) -> Result<String> {
        let bytes = DocxService::render(report)?;
        tracing::debug!(
            sections = report.sections().len(),
            answers = report.sections_of(SectionKind::QuestionAnswer).count(),
            bytes = bytes.len(),
            "Report rendered"
        );
        Ok(BASE64.encode(bytes))
    }
}

/// Splits on `\n` and `\r\n`, dropping empty lines.
pub fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::Answer;
    use crate::services::docx_service::tests::read_docx;

    fn answers(n: usize) -> AnalysisRequest {
        AnalysisRequest::Answers(
            (1..=n)
                .map(|i| Answer::new(format!("Вопрос {}", i), format!("Ответ {}", i)))
                .collect(),
        )
    }

    fn analysis_lines(report: &Report) -> Vec<String> {
        let section = report.sections_of(SectionKind::Analysis).next().unwrap();
        section.paragraphs[2..].iter().map(|p| p.plain_text()).collect()
    }

    #[test]
    fn one_section_per_answer_in_order() {
        let report = ReportService::assemble(&answers(10), "x");
        let qa: Vec<_> = report.sections_of(SectionKind::QuestionAnswer).collect();
        assert_eq!(qa.len(), 10);
        for (i, section) in qa.iter().enumerate() {
            assert_eq!(section.paragraphs[0].plain_text(), format!("Вопрос {}", i + 1));
            assert!(section.paragraphs[0].runs[0].bold);
            assert_eq!(
                section.paragraphs[1].plain_text(),
                format!("Ответ: Ответ {}", i + 1)
            );
            assert!(section.paragraphs[2].is_blank());
        }
        assert_eq!(report.sections().first().unwrap().kind, SectionKind::Title);
        assert_eq!(report.sections().last().unwrap().kind, SectionKind::Analysis);
    }

    #[test]
    fn title_block_is_bold_and_large() {
        let report = ReportService::assemble(&answers(1), "x");
        let title = &report.sections()[0].paragraphs[0].runs[0];
        assert_eq!(title.text, REPORT_TITLE);
        assert!(title.bold);
        assert_eq!(title.size, Some(TITLE_SIZE));
    }

    #[test]
    fn long_answers_are_kept_whole() {
        let long = "ж".repeat(5000);
        let request = AnalysisRequest::Answers(vec![Answer::new("Q", long.clone())]);
        let report = ReportService::assemble(&request, "x");
        let qa = report.sections_of(SectionKind::QuestionAnswer).next().unwrap();
        assert_eq!(qa.paragraphs[1].plain_text(), format!("Ответ: {}", long));
    }

    #[test]
    fn analysis_lines_skip_blanks_and_keep_order() {
        let report = ReportService::assemble(&answers(1), "Блок 1\r\n\r\nТекст\n\nВывод.\n");
        assert_eq!(analysis_lines(&report), vec!["Блок 1", "Текст", "Вывод."]);
    }

    #[test]
    fn raw_text_renders_without_qa_sections() {
        let request = AnalysisRequest::RawText("1. Да\n\n2. Нет".into());
        let report = ReportService::assemble(&request, "x");
        assert_eq!(report.sections_of(SectionKind::QuestionAnswer).count(), 0);
        let raw = report.sections_of(SectionKind::RawText).next().unwrap();
        let lines: Vec<_> = raw.paragraphs.iter().map(|p| p.plain_text()).collect();
        assert_eq!(lines, vec!["1. Да", "2. Нет"]);
    }

    #[test]
    fn base64_output_is_stable() {
        let report = ReportService::assemble(&answers(3), "Блок 1\nВывод.");
        let first = ReportService::render_base64(&report).unwrap();
        let second = ReportService::render_base64(&ReportService::assemble(
            &answers(3),
            "Блок 1\nВывод.",
        ))
        .unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn decoded_document_matches_report() {
        let request = AnalysisRequest::Answers(vec![Answer::new(
            "Ты считаешь себя добрым человеком?",
            "Да",
        )]);
        let report = ReportService::assemble(&request, "Блок 1\nВывод.");
        let bytes = BASE64
            .decode(ReportService::render_base64(&report).unwrap())
            .unwrap();
        let (paragraphs, _) = read_docx(&bytes);
        assert_eq!(
            paragraphs,
            vec![
                REPORT_TITLE,
                "",
                "Ответы респондента:",
                "Ты считаешь себя добрым человеком?",
                "Ответ: Да",
                "",
                "",
                "Анализ:",
                "Блок 1",
                "Вывод.",
            ]
        );
    }

    #[test]
    fn line_splitting() {
        let lines: Vec<_> = non_empty_lines("a\r\nb\n\n\r\nc").collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
        assert_eq!(non_empty_lines("").count(), 0);
    }
}
