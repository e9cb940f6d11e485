use super::fields::{ProcessField, CREATED_AT_FIELD, CREATOR_FIELD, PROCESS_ID_FIELD, PROCESS_NAME_FIELD};
use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::list_query::{PageItem, PagedList};
use crate::shared::record::{decode_html_entities, field_str, loose_eq, Record};
use crate::shared::reference::{ReferenceBook, SelectOption};
use crate::shared::report_source::{ReportQuery, ReportSource};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

const NO_VALUE: &str = "—";

/// Карточка процесса в сетке списка
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCard {
    pub id: String,
    pub title: String,
    pub group: String,
    pub subjects: String,
    pub created_at: String,
    pub creator: String,
}

impl ProcessCard {
    pub fn build(record: &Record, book: &ReferenceBook) -> Self {
        let title = decode_html_entities(&field_str(record, PROCESS_NAME_FIELD));
        let resolve = |field: ProcessField| {
            field
                .reference()
                .and_then(|name| book.resolve_label(name, &field_str(record, field.record_label())))
                .unwrap_or_else(|| NO_VALUE.to_string())
        };
        let or_dash = |s: String| if s.is_empty() { NO_VALUE.to_string() } else { s };

        Self {
            id: field_str(record, PROCESS_ID_FIELD),
            title: if title.is_empty() {
                "Без названия".to_string()
            } else {
                title
            },
            group: resolve(ProcessField::Group),
            subjects: resolve(ProcessField::SubjectsCount),
            created_at: or_dash(field_str(record, CREATED_AT_FIELD)),
            creator: or_dash(field_str(record, CREATOR_FIELD)),
        }
    }
}

/// Что показать, когда на странице нет карточек
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    NoData,
    NoResults(String),
}

/// Список процессов: загрузка отчёта, поиск, страницы
pub struct ProcessListStore {
    source: Rc<dyn ReportSource>,
    report: String,
    list: RefCell<PagedList>,
}

impl ProcessListStore {
    pub fn new(source: Rc<dyn ReportSource>, report: impl Into<String>, page_size: usize) -> Self {
        Self {
            source,
            report: report.into(),
            list: RefCell::new(PagedList::new(page_size)),
        }
    }

    /// Полная перезагрузка списка. При ошибке список остаётся пустым.
    pub async fn load(&self) -> ConsoleResult<usize> {
        let query = ReportQuery::new(self.report.as_str());
        match self.source.fetch_report(&query).await {
            Ok(records) => {
                let count = records.len();
                log::debug!("Загружено процессов: {}", count);
                self.list.borrow_mut().replace(records);
                Ok(count)
            }
            Err(e) => {
                log::error!("Ошибка загрузки процессов: {}", e);
                self.list.borrow_mut().clear();
                Err(e)
            }
        }
    }

    pub fn search(&self, query: &str) {
        self.list.borrow_mut().search(query);
    }

    pub fn go_to_page(&self, page: usize) -> bool {
        self.list.borrow_mut().go_to_page(page)
    }

    pub fn list(&self) -> Ref<'_, PagedList> {
        self.list.borrow()
    }

    pub fn page(&self) -> usize {
        self.list.borrow().page()
    }

    pub fn total_pages(&self) -> usize {
        self.list.borrow().total_pages()
    }

    pub fn visible_pages(&self) -> Vec<PageItem> {
        self.list.borrow().visible_pages()
    }

    pub fn find(&self, process_id: &str) -> ConsoleResult<Record> {
        self.list
            .borrow()
            .all()
            .iter()
            .find(|r| r.get(PROCESS_ID_FIELD).is_some_and(|v| loose_eq(v, process_id)))
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound(process_id.to_string()))
    }

    /// Карточки текущей страницы
    pub fn cards(&self, book: &ReferenceBook) -> Vec<ProcessCard> {
        self.list
            .borrow()
            .page_items()
            .iter()
            .map(|r| ProcessCard::build(r, book))
            .collect()
    }

    /// "Показано N из M"; без карточек счётчик не выводится
    pub fn counter(&self) -> Option<String> {
        let list = self.list.borrow();
        if list.filtered().is_empty() {
            return None;
        }
        Some(format!("Показано {} из {}", list.page_items().len(), list.filtered().len()))
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        let list = self.list.borrow();
        if !list.filtered().is_empty() {
            return None;
        }
        let query = list.query().trim();
        if query.is_empty() {
            Some(EmptyState::NoData)
        } else {
            Some(EmptyState::NoResults(query.to_string()))
        }
    }

    /// Варианты родительского процесса без редактируемого
    pub fn parent_options(&self, exclude_id: Option<&str>) -> Vec<SelectOption> {
        self.list
            .borrow()
            .all()
            .iter()
            .filter_map(|r| {
                let id = field_str(r, PROCESS_ID_FIELD);
                if id.is_empty() || exclude_id == Some(id.as_str()) {
                    return None;
                }
                let name = decode_html_entities(&field_str(r, PROCESS_NAME_FIELD));
                Some(SelectOption::new(id, name))
            })
            .collect()
    }
}
