//! Жизненный цикл формы процесса:
//! `Closed -> Opening -> Open(Create|Edit) -> Submitting -> Closed`,
//! при ошибке проверки или сохранения форма возвращается в `Open`.

use super::dependent;
use super::fields::{reference_names, ProcessField, PLACEHOLDER_LABEL};
use super::form::ProcessFormDto;
use super::list_store::ProcessListStore;
use crate::shared::error::{ConsoleError, ConsoleResult, FormTab};
use crate::shared::reference::SelectOption;
use crate::shared::reference_cache::ReferenceCache;
use crate::shared::report_source::{ReportSource, SubmitTarget};
use crate::system::{ConsoleConfig, SessionContext};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { process_id: String },
}

impl FormMode {
    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Новый процесс",
            FormMode::Edit { .. } => "Редактирование процесса",
        }
    }
}

/// Открытая форма
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub mode: FormMode,
    pub form: ProcessFormDto,
    pub micro_purpose_options: Vec<SelectOption>,
    pub error: Option<String>,
    pub active_tab: FormTab,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Opening { mode: FormMode },
    Open(FormSession),
    Submitting(FormSession),
}

impl FormState {
    pub fn session(&self) -> Option<&FormSession> {
        match self {
            FormState::Open(s) | FormState::Submitting(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, FormState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitKind {
    Created,
    Saved,
    /// Форма не была открыта
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub kind: SubmitKind,
    /// Ошибка перезагрузки списка после успешного сохранения
    pub reload_error: Option<ConsoleError>,
}

impl SubmitOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self.kind {
            SubmitKind::Created => Some("Процесс создан"),
            SubmitKind::Saved => Some("Процесс сохранен"),
            SubmitKind::Ignored => None,
        }
    }
}

pub struct ProcessFormController {
    session: SessionContext,
    config: ConsoleConfig,
    source: Rc<dyn ReportSource>,
    references: Rc<ReferenceCache>,
    list: Rc<ProcessListStore>,
    state: RefCell<FormState>,
}

impl ProcessFormController {
    pub fn new(
        session: SessionContext,
        config: ConsoleConfig,
        source: Rc<dyn ReportSource>,
        references: Rc<ReferenceCache>,
        list: Rc<ProcessListStore>,
    ) -> Self {
        Self {
            session,
            config,
            source,
            references,
            list,
            state: RefCell::new(FormState::Closed),
        }
    }

    pub fn state(&self) -> Ref<'_, FormState> {
        self.state.borrow()
    }

    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub async fn open_create(&self) {
        let mode = FormMode::Create;
        *self.state.borrow_mut() = FormState::Opening { mode: mode.clone() };
        self.references.ensure_loaded(&reference_names()).await;

        let form = ProcessFormDto::for_create(&self.config.draft_status_id, &self.session.user_id);
        self.finish_opening(mode, form);
    }

    /// Открыть процесс из загруженного списка
    pub async fn open_edit(&self, process_id: &str) -> ConsoleResult<()> {
        let record = self.list.find(process_id)?;
        let mode = FormMode::Edit {
            process_id: process_id.to_string(),
        };
        *self.state.borrow_mut() = FormState::Opening { mode: mode.clone() };
        self.references.ensure_loaded(&reference_names()).await;

        self.finish_opening(mode, ProcessFormDto::from_record(&record));
        Ok(())
    }

    fn finish_opening(&self, mode: FormMode, mut form: ProcessFormDto) {
        let mut state = self.state.borrow_mut();
        // Форму закрыли или открыли другую, пока грузились справочники
        if *state != (FormState::Opening { mode: mode.clone() }) {
            return;
        }

        let micro_purpose_options = dependent::on_purpose_changed(&self.references.book(), &mut form);
        *state = FormState::Open(FormSession {
            mode,
            form,
            micro_purpose_options,
            error: None,
            active_tab: FormTab::General,
        });
    }

    pub fn close(&self) {
        *self.state.borrow_mut() = FormState::Closed;
    }

    pub fn select_tab(&self, tab: FormTab) {
        if let FormState::Open(session) = &mut *self.state.borrow_mut() {
            session.active_tab = tab;
        }
    }

    /// Изменение поля с учётом зависимых полей
    pub fn update_field(&self, field: ProcessField, value: String) {
        let mut state = self.state.borrow_mut();
        let FormState::Open(session) = &mut *state else {
            return;
        };

        match field {
            ProcessField::Purpose => {
                session.form.purpose = value;
                session.micro_purpose_options =
                    dependent::on_purpose_changed(&self.references.book(), &mut session.form);
            }
            ProcessField::LegalBasis => dependent::on_legal_basis_changed(&mut session.form, &value),
            other => session.form.set_value(other, value),
        }
    }

    pub fn set_categories(&self, values: Vec<String>) {
        if let FormState::Open(session) = &mut *self.state.borrow_mut() {
            session.form.subject_categories = values;
        }
    }

    /// Варианты выпадающего списка для поля формы
    pub fn select_options(&self, field: ProcessField) -> Vec<SelectOption> {
        let state = self.state.borrow();
        let book = self.references.book();

        let mut options = match field {
            ProcessField::Parent => {
                let exclude = match state.session().map(|s| &s.mode) {
                    Some(FormMode::Edit { process_id }) => Some(process_id.as_str()),
                    _ => None,
                };
                self.list.parent_options(exclude)
            }
            ProcessField::MicroPurpose => state
                .session()
                .map(|s| s.micro_purpose_options.clone())
                .unwrap_or_default(),
            ProcessField::LegalBasis => dependent::legal_basis_options(&book),
            other => match other.reference() {
                Some(name) => book.options(name),
                None => Vec::new(),
            },
        };

        if field != ProcessField::SubjectCategories {
            options.insert(0, SelectOption::new("", PLACEHOLDER_LABEL));
        }
        options
    }

    /// Проверка, отправка и перезагрузка списка
    pub async fn submit(&self) -> ConsoleResult<SubmitOutcome> {
        let session = match &*self.state.borrow() {
            FormState::Open(session) => session.clone(),
            _ => {
                return Ok(SubmitOutcome {
                    kind: SubmitKind::Ignored,
                    reload_error: None,
                })
            }
        };

        let wire = match session.form.to_wire(&self.session.xsrf) {
            Ok(wire) => wire,
            Err(e) => {
                *self.state.borrow_mut() = FormState::Open(FormSession {
                    error: Some(e.to_string()),
                    active_tab: e.tab(),
                    ..session
                });
                return Err(e.into());
            }
        };

        let (target, kind) = match &session.mode {
            FormMode::Create => (
                SubmitTarget::Create {
                    form_id: self.config.process_form_id.clone(),
                },
                SubmitKind::Created,
            ),
            FormMode::Edit { process_id } => (
                SubmitTarget::Update {
                    record_id: process_id.clone(),
                },
                SubmitKind::Saved,
            ),
        };

        *self.state.borrow_mut() = FormState::Submitting(FormSession {
            error: None,
            ..session.clone()
        });

        match self.source.submit_record(&target, &wire).await {
            Ok(_) => {
                log::debug!("Процесс сохранён: {}", target.to_path());
                *self.state.borrow_mut() = FormState::Closed;
                let reload_error = self.list.load().await.err();
                Ok(SubmitOutcome { kind, reload_error })
            }
            Err(e) => {
                log::error!("Ошибка сохранения процесса: {}", e);
                *self.state.borrow_mut() = FormState::Open(FormSession {
                    error: Some(format!("Ошибка сохранения: {}", e)),
                    ..session
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_process::fields::LEGAL_BASIS_OTHER_VALUE;
    use crate::shared::error::ValidationError;
    use crate::shared::record::Record;
    use crate::shared::report_source::{ReportQuery, WireForm};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeSource {
        submitted: RefCell<Vec<(SubmitTarget, WireForm)>>,
        list_loads: Cell<usize>,
        fail_submit: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl ReportSource for FakeSource {
        async fn fetch_report(&self, query: &ReportQuery) -> ConsoleResult<Vec<Record>> {
            let text = match query.report.as_str() {
                "480" => {
                    self.list_loads.set(self.list_loads.get() + 1);
                    r#"[
                        {"ПроцессID": "15", "Процесс": "Кадровый учёт", "Основание обработки ПДн": "", "Иное основание": "Custom text", "Цель обработки ПДн": "1", "Микроцель обработки ПДн": "11"},
                        {"ПроцессID": "16", "Процесс": "Продажи", "Основание обработки ПДн": "41"}
                    ]"#
                }
                "Цель обработки ПДн" => r#"[{"Цель обработки ПДнID": "1", "Цель обработки ПДн": "Target"}]"#,
                "Микроцель обработки ПДн" => {
                    r#"[{"Микроцель обработки ПДнID": "11", "Микроцель обработки ПДн": "Расчёт", "Цель обработки ПДн": "Target"}]"#
                }
                "Основание обработки ПДн" => {
                    r#"[{"Основание обработки ПДнID": "41", "Основание обработки ПДн": "Договор"}]"#
                }
                _ => "[]",
            };
            Ok(serde_json::from_str(text).unwrap())
        }

        async fn submit_record(
            &self,
            target: &SubmitTarget,
            form: &WireForm,
        ) -> ConsoleResult<serde_json::Value> {
            if self.fail_submit.get() {
                return Err(ConsoleError::http(500, "Internal Server Error"));
            }
            self.submitted
                .borrow_mut()
                .push((target.clone(), form.clone()));
            Ok(serde_json::json!({"id": "17"}))
        }
    }

    fn controller() -> (Rc<FakeSource>, ProcessFormController) {
        let source = Rc::new(FakeSource::default());
        let config = ConsoleConfig::default();
        let references = Rc::new(ReferenceCache::new(source.clone()));
        let list = Rc::new(ProcessListStore::new(source.clone(), "480", 20));
        block_on(list.load()).unwrap();

        let controller = ProcessFormController::new(
            SessionContext::new("417", "pdn", "tok"),
            config,
            source.clone(),
            references,
            list,
        );
        (source, controller)
    }

    fn session(controller: &ProcessFormController) -> FormSession {
        controller.snapshot().session().cloned().unwrap()
    }

    #[test]
    fn test_open_create_defaults() {
        let (_, controller) = controller();
        block_on(controller.open_create());

        let s = session(&controller);
        assert_eq!(s.mode, FormMode::Create);
        assert_eq!(s.form.status, "372");
        assert_eq!(s.form.initiator, "417");
        assert!(s.form.name.is_empty());
        assert_eq!(s.active_tab, FormTab::General);
    }

    #[test]
    fn test_open_edit_not_found() {
        let (_, controller) = controller();
        let err = block_on(controller.open_edit("99")).unwrap_err();
        assert_eq!(err, ConsoleError::NotFound("99".into()));
        assert_eq!(controller.snapshot(), FormState::Closed);
    }

    #[test]
    fn test_edit_unchanged_other_basis_round_trip() {
        let (source, controller) = controller();
        block_on(controller.open_edit("15")).unwrap();

        let s = session(&controller);
        assert_eq!(s.form.legal_basis, LEGAL_BASIS_OTHER_VALUE);
        assert_eq!(s.form.micro_purpose, "11");
        assert_eq!(s.micro_purpose_options.len(), 1);

        let outcome = block_on(controller.submit()).unwrap();
        assert_eq!(outcome.kind, SubmitKind::Saved);
        assert_eq!(outcome.message(), Some("Процесс сохранен"));
        assert_eq!(controller.snapshot(), FormState::Closed);

        let submitted = source.submitted.borrow();
        let (target, wire) = &submitted[0];
        assert_eq!(
            target,
            &SubmitTarget::Update {
                record_id: "15".into()
            }
        );
        assert_eq!(wire.get("t336"), Some(""));
        assert_eq!(wire.get("t600"), Some("Custom text"));
        assert_eq!(wire.get("_xsrf"), Some("tok"));
        // первичная загрузка + перезагрузка после сохранения
        assert_eq!(source.list_loads.get(), 2);
    }

    #[test]
    fn test_validation_keeps_form_open() {
        let (source, controller) = controller();
        block_on(controller.open_create());
        controller.select_tab(FormTab::Processing);

        let err = block_on(controller.submit()).unwrap_err();
        assert_eq!(err, ConsoleError::Validation(ValidationError::MissingName));

        let s = session(&controller);
        assert_eq!(s.error.as_deref(), Some("Укажите название процесса"));
        assert_eq!(s.active_tab, FormTab::General);
        assert!(source.submitted.borrow().is_empty());

        controller.update_field(ProcessField::Name, "Учёт".into());
        controller.update_field(ProcessField::LegalBasis, LEGAL_BASIS_OTHER_VALUE.into());
        let err = block_on(controller.submit()).unwrap_err();
        assert_eq!(
            err,
            ConsoleError::Validation(ValidationError::MissingLegalBasisOther)
        );
        assert_eq!(session(&controller).active_tab, FormTab::Purpose);
    }

    #[test]
    fn test_create_posts_to_new_form() {
        let (source, controller) = controller();
        block_on(controller.open_create());
        controller.update_field(ProcessField::Name, "Учёт".into());
        controller.update_field(ProcessField::LegalBasis, "41".into());

        let outcome = block_on(controller.submit()).unwrap();
        assert_eq!(outcome.kind, SubmitKind::Created);
        assert_eq!(
            source.submitted.borrow()[0].0,
            SubmitTarget::Create {
                form_id: "294".into()
            }
        );
    }

    #[test]
    fn test_server_error_reopens_with_message() {
        let (source, controller) = controller();
        block_on(controller.open_edit("16")).unwrap();
        source.fail_submit.set(true);

        assert!(block_on(controller.submit()).is_err());
        let state = controller.snapshot();
        assert!(matches!(state, FormState::Open(_)));
        assert_eq!(
            state.session().unwrap().error.as_deref(),
            Some("Ошибка сохранения: Internal Server Error")
        );
    }

    #[test]
    fn test_purpose_change_clears_micro_purpose() {
        let (_, controller) = controller();
        block_on(controller.open_edit("15")).unwrap();

        controller.update_field(ProcessField::Purpose, "2".into());
        let s = session(&controller);
        assert!(s.form.micro_purpose.is_empty());
        assert!(s.micro_purpose_options.is_empty());
    }

    #[test]
    fn test_select_options() {
        let (_, controller) = controller();
        block_on(controller.open_edit("15")).unwrap();

        let parents = controller.select_options(ProcessField::Parent);
        let values: Vec<&str> = parents.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["", "16"]);

        let basis = controller.select_options(ProcessField::LegalBasis);
        assert_eq!(basis.len(), 3);
        assert!(controller.select_options(ProcessField::SubjectCategories).is_empty());
    }
}
