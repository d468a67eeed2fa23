//! Form state for the interactive manager
//!
//! Each menu action owns a form made of text fields and checkboxes followed
//! by a submit row.

/// Kind of input a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
}

/// One labelled input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
}

impl Field {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            kind: FieldKind::Text,
            value: String::new(),
            checked: false,
        }
    }

    pub fn checkbox(label: &'static str) -> Self {
        Self {
            label,
            kind: FieldKind::Checkbox,
            value: String::new(),
            checked: false,
        }
    }
}

/// A list of fields plus a submit row.
///
/// `selected == fields.len()` means the submit row has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    fields: Vec<Field>,
    submit_label: &'static str,
    selected: usize,
}

impl Form {
    pub fn new(fields: Vec<Field>, submit_label: &'static str) -> Self {
        Self {
            fields,
            submit_label,
            selected: 0,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn submit_label(&self) -> &'static str {
        self.submit_label
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn on_submit(&self) -> bool {
        self.selected == self.fields.len()
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % (self.fields.len() + 1);
    }

    pub fn prev(&mut self) {
        let rows = self.fields.len() + 1;
        self.selected = (self.selected + rows - 1) % rows;
    }

    /// Types a character into the selected field. Space toggles a checkbox.
    pub fn input(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            match field.kind {
                FieldKind::Text => field.value.push(c),
                FieldKind::Checkbox if c == ' ' => field.checked = !field.checked,
                FieldKind::Checkbox => {}
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.selected) {
            field.value.pop();
        }
    }

    /// Text value of the field at `index` (empty when out of range)
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    /// Checkbox state of the field at `index`
    pub fn checked(&self, index: usize) -> bool {
        self.fields.get(index).is_some_and(|f| f.checked)
    }

    /// Text value of the field at `index`, `None` when blank
    pub fn optional(&self, index: usize) -> Option<String> {
        Some(self.value(index))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Clears every field and moves back to the top
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.checked = false;
        }
        self.selected = 0;
    }
}
