use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification--success",
            NotificationKind::Error => "notification--error",
            NotificationKind::Warning => "notification--warning",
            NotificationKind::Info => "notification--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Общее состояние страницы: всплывающие уведомления
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub notifications: RwSignal<Vec<Notification>>,
    next_id: StoredValue<u64>,
    hide_after_ms: u32,
}

impl AppGlobalContext {
    pub fn new(hide_after_ms: u32) -> Self {
        Self {
            notifications: RwSignal::new(vec![]),
            next_id: StoredValue::new(0),
            hide_after_ms,
        }
    }

    /// Показать уведомление; скрывается само через `hide_after_ms`
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);

        self.notifications.update(|list| {
            list.push(Notification {
                id,
                kind,
                message: message.into(),
            })
        });

        let this = *self;
        let delay = self.hide_after_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            this.dismiss(id);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Warning, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Info, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.update(|list| list.retain(|n| n.id != id));
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found in context")
}
