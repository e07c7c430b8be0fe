use crate::models::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    /// Rendered masked.
    Secret,
    /// Cycles through `Category::all()`; typing is ignored.
    Category,
}

#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub(crate) label: &'static str,
    pub(crate) value: String,
    pub(crate) kind: FieldKind,
}

impl Field {
    fn new(label: &'static str, kind: FieldKind) -> Self {
        let value = match kind {
            FieldKind::Category => Category::default().as_str().to_string(),
            _ => String::new(),
        };
        Self { label, value, kind }
    }

    /// Value as it should appear on screen.
    pub(crate) fn display(&self) -> String {
        match self.kind {
            FieldKind::Secret => "•".repeat(self.value.chars().count()),
            FieldKind::Category => format!("< {} >", self.value),
            FieldKind::Text => self.value.clone(),
        }
    }
}

/// Which form the editing keys are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormKind {
    Login,
    Register,
    Expense,
    Limit,
}

#[derive(Debug, Clone)]
pub(crate) struct Form {
    pub(crate) fields: Vec<Field>,
    pub(crate) focus: usize,
}

pub(crate) const LOGIN_EMAIL: usize = 0;
pub(crate) const LOGIN_PASSWORD: usize = 1;

pub(crate) const REGISTER_NAME: usize = 0;
pub(crate) const REGISTER_EMAIL: usize = 1;
pub(crate) const REGISTER_PASSWORD: usize = 2;

pub(crate) const EXPENSE_TITLE: usize = 0;
pub(crate) const EXPENSE_AMOUNT: usize = 1;
pub(crate) const EXPENSE_CATEGORY: usize = 2;

pub(crate) const LIMIT_AMOUNT: usize = 0;

impl Form {
    fn new(fields: Vec<Field>) -> Self {
        Self { fields, focus: 0 }
    }

    pub(crate) fn login() -> Self {
        Self::new(vec![
            Field::new("Email", FieldKind::Text),
            Field::new("Password", FieldKind::Secret),
        ])
    }

    pub(crate) fn register() -> Self {
        Self::new(vec![
            Field::new("Name", FieldKind::Text),
            Field::new("Email", FieldKind::Text),
            Field::new("Password", FieldKind::Secret),
        ])
    }

    pub(crate) fn expense() -> Self {
        Self::new(vec![
            Field::new("Title", FieldKind::Text),
            Field::new("Amount", FieldKind::Text),
            Field::new("Category", FieldKind::Category),
        ])
    }

    pub(crate) fn limit() -> Self {
        Self::new(vec![Field::new("Monthly limit", FieldKind::Text)])
    }

    pub(crate) fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.as_str())
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub(crate) fn category(&self, index: usize) -> Category {
        Category::parse(self.value(index))
    }

    pub(crate) fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub(crate) fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind != FieldKind::Category {
                field.value.push(c);
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind != FieldKind::Category {
                field.value.pop();
            }
        }
    }

    /// Step the focused category field; no-op on text fields.
    pub(crate) fn adjust(&mut self, delta: i32) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if field.kind == FieldKind::Category {
                field.value = Category::parse(&field.value).cycle(delta).as_str().to_string();
            }
        }
    }

    /// Empty every field (categories go back to the default) and refocus the
    /// first one.
    pub(crate) fn reset(&mut self) {
        for field in &mut self.fields {
            *field = Field::new(field.label, field.kind);
        }
        self.focus = 0;
    }

    pub(crate) fn clear_secrets(&mut self) {
        for field in &mut self.fields {
            if field.kind == FieldKind::Secret {
                field.value.clear();
            }
        }
    }
}
