use super::super::{use_console, ConsoleHandle};
use crate::layout::global_context::{use_global_context, AppGlobalContext};
use contracts::domain::a001_process::controller::{FormMode, FormState};
use contracts::domain::a001_process::fields::ProcessField;
use contracts::shared::error::{ConsoleError, FormTab};
use contracts::shared::reference::SelectOption;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// ViewModel модальной формы процесса.
///
/// Состояние формы хранит `ProcessFormController`; здесь только команды и
/// производные значения для представления.
#[derive(Clone, Copy)]
pub struct ProcessFormVm {
    console: ConsoleHandle,
    ctx: AppGlobalContext,
    /// Справочники ещё грузятся
    pub opening: RwSignal<bool>,
    /// Идёт запрос сохранения
    pub saving: RwSignal<bool>,
}

impl ProcessFormVm {
    pub fn new() -> Self {
        Self {
            console: use_console(),
            ctx: use_global_context(),
            opening: RwSignal::new(false),
            saving: RwSignal::new(false),
        }
    }

    pub fn state(&self) -> FormState {
        self.console.read(|c| c.form.snapshot())
    }

    pub fn is_visible(&self) -> bool {
        self.opening.get() || self.state().is_visible()
    }

    pub fn title(&self) -> String {
        match self.state() {
            FormState::Opening { mode } => mode.title().to_string(),
            FormState::Open(s) | FormState::Submitting(s) => s.mode.title().to_string(),
            FormState::Closed => String::new(),
        }
    }

    /// Id редактируемого процесса
    pub fn editing_id(&self) -> Option<String> {
        match self.state().session().map(|s| s.mode.clone()) {
            Some(FormMode::Edit { process_id }) => Some(process_id),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<String> {
        self.state().session().and_then(|s| s.error.clone())
    }

    pub fn active_tab(&self) -> FormTab {
        self.state()
            .session()
            .map(|s| s.active_tab)
            .unwrap_or(FormTab::General)
    }

    pub fn value(&self, field: ProcessField) -> String {
        self.state()
            .session()
            .map(|s| s.form.value(field))
            .unwrap_or_default()
    }

    pub fn categories(&self) -> Vec<String> {
        self.state()
            .session()
            .map(|s| s.form.subject_categories.clone())
            .unwrap_or_default()
    }

    pub fn options(&self, field: ProcessField) -> Vec<SelectOption> {
        self.console.read(|c| c.form.select_options(field))
    }

    pub fn legal_basis_other_visible(&self) -> bool {
        self.state()
            .session()
            .is_some_and(|s| s.form.is_legal_basis_other())
    }

    pub fn is_busy(&self) -> bool {
        self.saving.get() || self.state().is_submitting()
    }

    // ── Команды ──────────────────────────────────────────────────────────────

    pub fn open_create(&self) {
        let this = *self;
        this.opening.set(true);
        spawn_local(async move {
            let console = this.console.get();
            console.form.open_create().await;
            this.opening.set(false);
            this.console.touch();
        });
    }

    pub fn open_edit(&self, process_id: String) {
        let this = *self;
        this.opening.set(true);
        spawn_local(async move {
            let console = this.console.get();
            match console.form.open_edit(&process_id).await {
                Ok(()) => {}
                // процесс пропал из списка после перезагрузки
                Err(e @ ConsoleError::NotFound(_)) => {
                    log::warn!("Процесс {} не открыт: {}", process_id, e);
                    this.ctx.warning(e.to_string());
                }
                Err(e) => {
                    log::error!("Процесс {} не открыт: {}", process_id, e);
                    this.ctx.error(e.to_string());
                }
            }
            this.opening.set(false);
            this.console.touch();
        });
    }

    pub fn close(&self) {
        self.console.get().form.close();
        self.opening.set(false);
        self.console.touch();
    }

    pub fn select_tab(&self, tab: FormTab) {
        self.console.get().form.select_tab(tab);
        self.console.touch();
    }

    pub fn update_field(&self, field: ProcessField, value: String) {
        self.console.get().form.update_field(field, value);
        self.console.touch();
    }

    pub fn set_categories(&self, values: Vec<String>) {
        self.console.get().form.set_categories(values);
        self.console.touch();
    }

    pub fn submit(&self) {
        if self.saving.get_untracked() {
            return;
        }
        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            let console = this.console.get();
            let result = console.form.submit().await;
            this.saving.set(false);
            this.console.touch();

            match result {
                Ok(outcome) => {
                    if let Some(message) = outcome.message() {
                        this.ctx.success(message);
                    }
                    if let Some(e) = outcome.reload_error {
                        this.ctx.error(format!("Ошибка загрузки процессов: {}", e));
                    }
                }
                // ошибка уже выведена в самой форме
                Err(e) => log::debug!("Форма не сохранена: {}", e),
            }
        });
    }
}
