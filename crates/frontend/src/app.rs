use crate::domain::a001_process::ui::list::ProcessRegistry;
use crate::domain::a001_process::ui::ConsoleHandle;
use crate::layout::{AppGlobalContext, NotificationPanel};
use crate::shared::api_utils::{read_config, read_session, redirect};
use crate::shared::report_api::GlooReportSource;
use contracts::domain::a001_process::ProcessConsole;
use contracts::shared::report_source::ReportSource;
use leptos::prelude::*;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
    let session = read_session();
    if session.is_guest() {
        log::info!("Гостевая сессия, переход на страницу входа");
        redirect(&session.login_url());
        return view! { <div class="app app--redirect"></div> }.into_any();
    }

    let config = read_config();
    provide_context(AppGlobalContext::new(config.notification_ms));

    let source: Rc<dyn ReportSource> = Rc::new(GlooReportSource::new(session.clone()));
    provide_context(ConsoleHandle::new(ProcessConsole::new(session, config, source)));

    view! {
        <div class="app">
            <ProcessRegistry />
            <NotificationPanel />
        </div>
    }
    .into_any()
}
