/// A styled text run. `size` is in half-points, as stored in WordprocessingML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub size: Option<u32>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            size: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            size: None,
        }
    }

    pub fn with_size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_run(run: Run) -> Self {
        Self { runs: vec![run] }
    }

    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Title,
    QuestionAnswer,
    RawText,
    Analysis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub paragraphs: Vec<Paragraph>,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            paragraphs: Vec::new(),
        }
    }

    pub fn push(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn extend(mut self, paragraphs: impl IntoIterator<Item = Paragraph>) -> Self {
        self.paragraphs.extend(paragraphs);
        self
    }
}

/// Finished document. Only obtainable through [`ReportBuilder::build`], so it
/// cannot change after assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    title: String,
    sections: Vec<Section>,
}

impl Report {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }
}

#[derive(Debug, Clone)]
pub struct ReportBuilder {
    title: String,
    sections: Vec<Section>,
}

impl ReportBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Sections render in the order they are appended.
    pub fn append_section(&mut self, section: Section) -> &mut Self {
        self.sections.push(section);
        self
    }

    pub fn build(self) -> Report {
        Report {
            title: self.title,
            sections: self.sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_keep_append_order() {
        let mut builder = ReportBuilder::new("T");
        builder
            .append_section(Section::new(SectionKind::Title).push(Paragraph::text("a")))
            .append_section(Section::new(SectionKind::QuestionAnswer).push(Paragraph::text("b")))
            .append_section(Section::new(SectionKind::Analysis).push(Paragraph::text("c")));
        let report = builder.build();

        let kinds: Vec<_> = report.sections().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Title, SectionKind::QuestionAnswer, SectionKind::Analysis]
        );
        assert_eq!(report.sections_of(SectionKind::QuestionAnswer).count(), 1);
    }

    #[test]
    fn paragraph_text_joins_runs() {
        let p = Paragraph {
            runs: vec![Run::bold("Ответ: "), Run::plain("Да")],
        };
        assert_eq!(p.plain_text(), "Ответ: Да");
        assert!(!p.is_blank());
        assert!(Paragraph::blank().is_blank());
    }
}
