use std::rc::Rc;

/// Severity of a floating alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    /// Bootstrap class for this severity
    pub fn css_class(self) -> &'static str {
        match self {
            AlertKind::Success => "alert-success",
            AlertKind::Error => "alert-danger",
            AlertKind::Warning => "alert-warning",
            AlertKind::Info => "alert-info",
        }
    }

    /// Full class list of the floating alert element
    pub fn class_list(self) -> String {
        format!(
            "alert {} alert-dismissible alert-floating fade show",
            self.css_class()
        )
    }
}

/// Shows a single transient message to the user, replacing any previous one
pub trait AlertPresenter {
    fn show(&self, kind: AlertKind, message: &str);
}

/// Shared presenter handle, comparable so it can travel in component props
#[derive(Clone)]
pub struct AlertHandle(pub Rc<dyn AlertPresenter>);

impl AlertHandle {
    #[cfg(test)]
    pub fn new<P: AlertPresenter + 'static>(presenter: P) -> Self {
        Self(Rc::new(presenter))
    }

    pub fn show(&self, kind: AlertKind, message: &str) {
        self.0.show(kind, message);
    }
}

impl PartialEq for AlertHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
