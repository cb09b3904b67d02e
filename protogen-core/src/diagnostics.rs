use std::fmt;
use std::io::{self, Write};

/// A single non-fatal model diagnostic.
///
/// Produced whenever the transform pass clears an offending attribute
/// instead of aborting (misused `array`/`variableArray`/`dependsOn`, a
/// default field followed by a non-default one, a packet declared as an
/// array, and similar). Displays as `"<scope>: <field>: <reason>"`, or
/// `"<scope>: <reason>"` when no field is implicated, matching the line
/// format the transform pass is required to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub scope: String,
    pub field: Option<String>,
    pub reason: String,
}

impl Diagnostic {
    pub fn new(scope: impl Into<String>, field: Option<String>, reason: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}: {}", self.scope, field, self.reason),
            None => write!(f, "{}: {}", self.scope, self.reason),
        }
    }
}

/// Append-only collector for non-fatal diagnostics.
///
/// A collector passed by `&mut` reference through the transform pass is
/// preferable to writing straight to standard output: it lets an external
/// CLI collaborator decide the sink (stdout, a log file, a test assertion)
/// rather than baking that choice into the compiler core.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Records a diagnostic attributed to `scope` (a structure or packet
    /// name) and, optionally, a specific field within it.
    pub fn report(&mut self, scope: impl Into<String>, field: Option<&str>, reason: impl Into<String>) {
        self.0.push(Diagnostic::new(scope, field.map(str::to_string), reason));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Writes one diagnostic per line, the way an external CLI collaborator
    /// would forward the collector's contents to standard output.
    pub fn print_to(&self, w: &mut dyn Write) -> io::Result<()> {
        for d in &self.0 {
            writeln!(w, "{}", d)?;
        }
        Ok(())
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
