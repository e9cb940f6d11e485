use super::global_context::use_global_context;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Панель уведомлений в правом верхнем углу
#[component]
pub fn NotificationPanel() -> impl IntoView {
    let ctx = use_global_context();

    view! {
        <div class="notification-panel">
            <For
                each=move || ctx.notifications.get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=format!("notification {}", n.kind.css_class()) role="alert">
                            <span class="notification__message">{n.message}</span>
                            <button
                                class="button button--icon notification__close"
                                title="Закрыть"
                                on:click=move |_| ctx.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
