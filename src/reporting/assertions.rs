use std::fmt;

const RULE: &str = "========================================";
const SEPARATOR: &str = "----------------------------------------";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionRecord {
    pub field: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionRecord {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

/// (field, expected, actual) triples, compared by their display form.
#[derive(Debug, Clone, Default)]
pub struct AssertionSummary {
    records: Vec<AssertionRecord>,
}

impl AssertionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        mut self,
        field: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        self.records.push(AssertionRecord {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
        self
    }

    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn all_passed(&self) -> bool {
        self.records.iter().all(AssertionRecord::passed)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AssertionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No assertions recorded");
        }
        writeln!(f, "ASSERTIONS SUMMARY")?;
        writeln!(f, "{}", RULE)?;
        for record in &self.records {
            writeln!(f)?;
            writeln!(f, "Field: {}", record.field)?;
            writeln!(f, "Expected: {}", record.expected)?;
            writeln!(f, "Actual: {}", record.actual)?;
            writeln!(
                f,
                "Status: {}",
                if record.passed() { "PASS" } else { "FAIL" }
            )?;
            writeln!(f, "{}", SEPARATOR)?;
        }
        Ok(())
    }
}
