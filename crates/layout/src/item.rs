//! The items submitted to output drivers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tabula_style::PageSetup;
use tabula_table::TableProvider;

/// Output items are immutable once submitted and shared by every driver.
pub type SharedItem = Arc<OutputItem>;

#[derive(Debug)]
pub enum OutputItem {
    Table(TableItem),
    Text(TextItem),
    Message(Message),
    PageBreak,
    PageSetup(PageSetup),
    Group(GroupItem),
}

impl OutputItem {
    pub fn text(kind: TextKind, text: impl Into<String>) -> Self {
        OutputItem::Text(TextItem {
            kind,
            text: text.into(),
        })
    }

    pub fn table(table: impl TableProvider + 'static) -> Self {
        OutputItem::Table(TableItem::new(Box::new(table)))
    }

    /// Short name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            OutputItem::Table(_) => "table",
            OutputItem::Text(_) => "text",
            OutputItem::Message(_) => "message",
            OutputItem::PageBreak => "page break",
            OutputItem::PageSetup(_) => "page setup",
            OutputItem::Group(_) => "group",
        }
    }

    /// Label for outlines: a table's title, a group's label, or a name for
    /// the kind of item.
    pub fn label(&self) -> String {
        let label = match self {
            OutputItem::Table(table) => return table.title.clone().unwrap_or_else(|| "Table".into()),
            OutputItem::Group(GroupItem::Open { label }) => return label.clone(),
            OutputItem::Group(GroupItem::Close) => "Group",
            OutputItem::Text(text) => match text.kind {
                TextKind::Title => "Title",
                TextKind::Log => "Log",
                TextKind::Syntax => "Syntax",
                TextKind::PageTitle => "Page Title",
            },
            OutputItem::Message(message) => match message.severity {
                Severity::Error => "Error",
                Severity::Warning => "Warning",
                Severity::Note => "Note",
            },
            OutputItem::PageBreak => "Page Break",
            OutputItem::PageSetup(_) => "Page Setup",
        };
        label.to_string()
    }

    /// Group and page setup items only change driver state.
    pub fn has_layout(&self) -> bool {
        !matches!(self, OutputItem::PageSetup(_) | OutputItem::Group(_))
    }

    /// Hands a table item's provider its `destroy` hook.
    pub fn release(self) {
        if let OutputItem::Table(item) = self {
            item.table.destroy();
        }
    }
}

#[derive(Debug)]
pub struct TableItem {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub table: Box<dyn TableProvider>,
}

impl TableItem {
    pub fn new(table: Box<dyn TableProvider>) -> Self {
        Self {
            title: None,
            caption: None,
            table,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    Title,
    Log,
    Syntax,
    PageTitle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub kind: TextKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Note,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupItem {
    Open { label: String },
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_name_the_item() {
        let table = OutputItem::Table(TableItem::new(Box::new(tabula_table::Table::new(1, 1))));
        assert_eq!(table.label(), "Table");
        let titled = OutputItem::Table(
            TableItem::new(Box::new(tabula_table::Table::new(1, 1))).with_title("Descriptives"),
        );
        assert_eq!(titled.label(), "Descriptives");
        assert_eq!(OutputItem::text(TextKind::PageTitle, "x").label(), "Page Title");
        let warning = OutputItem::Message(Message {
            severity: Severity::Warning,
            text: "careful".into(),
        });
        assert_eq!(warning.label(), "Warning");
    }
}
