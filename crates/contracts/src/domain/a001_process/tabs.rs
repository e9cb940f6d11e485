//! Вкладки связанных записей процесса: ПДн, экспертиза, риски, передача.
//!
//! Данные вкладки кэшируются по паре (процесс, вкладка) и больше не
//! перезапрашиваются. Поиск и "Показать ещё" работают по кэшу на клиенте.

use crate::shared::error::ConsoleResult;
use crate::shared::list_query::filter_records;
use crate::shared::record::Record;
use crate::shared::record_view::{infer_layout, RecordLayout, ViewRow};
use crate::shared::reference::identifier_field;
use crate::shared::report_source::{ReportQuery, ReportSource};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Параметр фильтра отчёта по процессу
pub const PROCESS_FILTER_PARAM: &str = "FR_procID";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessTab {
    PersonalData,
    Expertise,
    Risks,
    Transfer,
}

impl ProcessTab {
    pub const ALL: [ProcessTab; 4] = [
        ProcessTab::PersonalData,
        ProcessTab::Expertise,
        ProcessTab::Risks,
        ProcessTab::Transfer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProcessTab::PersonalData => "ПДн",
            ProcessTab::Expertise => "Экспертиза",
            ProcessTab::Risks => "Риски",
            ProcessTab::Transfer => "Передача",
        }
    }

    /// Отчёт платформы: `proc <Вкладка>`
    pub fn report_name(&self) -> String {
        format!("proc {}", self.name())
    }

    pub fn query(&self, process_id: &str) -> ReportQuery {
        ReportQuery::new(self.report_name()).with_param(PROCESS_FILTER_PARAM, process_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TabKey {
    process_id: String,
    tab: ProcessTab,
}

struct CacheEntry {
    records: Vec<Record>,
    layout: Option<RecordLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TabStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Ошибка показывается внутри вкладки
    Failed(String),
}

#[derive(Default)]
struct TabState {
    process_id: Option<String>,
    status: TabStatus,
    query: String,
    page: usize,
    layout: Option<RecordLayout>,
    filtered: Vec<Record>,
}

impl TabState {
    fn reset(&mut self, process_id: &str) {
        *self = TabState {
            process_id: Some(process_id.to_string()),
            status: TabStatus::Loading,
            page: 1,
            ..TabState::default()
        };
    }

    fn is_for(&self, process_id: &str) -> bool {
        self.process_id.as_deref() == Some(process_id)
    }
}

/// Модель представления вкладки
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub status: TabStatus,
    pub layout: Option<RecordLayout>,
    pub rows: Vec<ViewRow>,
    pub query: String,
    pub total: usize,
    /// Сколько записей ещё скрыто
    pub remaining: usize,
    /// Сколько добавит "Показать ещё"
    pub next_batch: usize,
}

/// Запрос на редактирование строки вкладки (редактор пока не реализован)
#[derive(Debug, Clone, PartialEq)]
pub struct RowEditRequest {
    pub tab: ProcessTab,
    pub process_id: String,
    pub payload: Record,
    pub id_field: Option<String>,
}

pub struct TabDataController {
    source: Rc<dyn ReportSource>,
    page_size: usize,
    capacity: Option<usize>,
    cache: RefCell<HashMap<TabKey, CacheEntry>>,
    recency: RefCell<VecDeque<TabKey>>,
    tabs: RefCell<HashMap<ProcessTab, TabState>>,
}

impl TabDataController {
    pub fn new(source: Rc<dyn ReportSource>, page_size: usize, capacity: Option<usize>) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            capacity,
            cache: RefCell::new(HashMap::new()),
            recency: RefCell::new(VecDeque::new()),
            tabs: RefCell::new(HashMap::new()),
        }
    }

    pub fn is_cached(&self, tab: ProcessTab, process_id: &str) -> bool {
        self.cache.borrow().contains_key(&TabKey {
            process_id: process_id.to_string(),
            tab,
        })
    }

    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    fn touch(&self, key: &TabKey) {
        let mut recency = self.recency.borrow_mut();
        recency.retain(|k| k != key);
        recency.push_back(key.clone());
    }

    fn store(&self, key: TabKey, entry: CacheEntry) {
        let mut cache = self.cache.borrow_mut();
        if let Some(capacity) = self.capacity {
            let mut recency = self.recency.borrow_mut();
            while !cache.contains_key(&key) && cache.len() >= capacity.max(1) {
                let Some(oldest) = recency.pop_front() else {
                    break;
                };
                log::debug!("Вытеснена вкладка {} процесса {}", oldest.tab.name(), oldest.process_id);
                cache.remove(&oldest);
            }
        }
        cache.insert(key.clone(), entry);
        drop(cache);
        self.touch(&key);
    }

    /// Открыть вкладку процесса: из кэша, иначе запрос к платформе
    pub async fn load_tab(&self, tab: ProcessTab, process_id: &str) -> ConsoleResult<()> {
        let key = TabKey {
            process_id: process_id.to_string(),
            tab,
        };

        let hit = {
            let cache = self.cache.borrow();
            cache.get(&key).map(|entry| {
                let mut tabs = self.tabs.borrow_mut();
                let state = tabs.entry(tab).or_default();
                // поиск и страница относятся к процессу, для другого сбрасываются
                if !state.is_for(process_id) {
                    state.query.clear();
                    state.page = 1;
                }
                if state.page == 0 {
                    state.page = 1;
                }
                state.process_id = Some(process_id.to_string());
                state.status = TabStatus::Ready;
                state.layout = entry.layout.clone();
                state.filtered = filter_records(&entry.records, &state.query);
            })
        };
        if hit.is_some() {
            log::debug!("Вкладка {} процесса {} из кэша", tab.name(), process_id);
            self.touch(&key);
            return Ok(());
        }

        self.tabs
            .borrow_mut()
            .entry(tab)
            .or_default()
            .reset(process_id);

        let result = self.source.fetch_report(&tab.query(process_id)).await;

        let mut tabs = self.tabs.borrow_mut();
        let state = tabs.entry(tab).or_default();
        let current = state.is_for(process_id);

        match result {
            Ok(records) => {
                let layout = infer_layout(&records);
                if current {
                    state.status = TabStatus::Ready;
                    state.layout = layout.clone();
                    state.filtered = filter_records(&records, &state.query);
                }
                drop(tabs);
                self.store(key, CacheEntry { records, layout });
                Ok(())
            }
            Err(e) => {
                log::error!("Ошибка загрузки вкладки {}: {}", tab.name(), e);
                if current {
                    state.status = TabStatus::Failed(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Поиск по всем полям кэшированных записей вкладки
    pub fn filter(&self, tab: ProcessTab, query: &str) {
        let mut tabs = self.tabs.borrow_mut();
        let state = tabs.entry(tab).or_default();
        state.query = query.to_string();
        state.page = 1;

        let Some(process_id) = state.process_id.clone() else {
            return;
        };
        let key = TabKey { process_id, tab };
        state.filtered = self
            .cache
            .borrow()
            .get(&key)
            .map(|entry| filter_records(&entry.records, query))
            .unwrap_or_default();
    }

    /// "Показать ещё": следующая порция, если она есть
    pub fn load_more(&self, tab: ProcessTab) -> bool {
        let mut tabs = self.tabs.borrow_mut();
        let Some(state) = tabs.get_mut(&tab) else {
            return false;
        };
        if state.page * self.page_size < state.filtered.len() {
            state.page += 1;
            true
        } else {
            false
        }
    }

    pub fn view(&self, tab: ProcessTab) -> TabView {
        let tabs = self.tabs.borrow();
        let Some(state) = tabs.get(&tab) else {
            return TabView {
                status: TabStatus::Idle,
                layout: None,
                rows: Vec::new(),
                query: String::new(),
                total: 0,
                remaining: 0,
                next_batch: 0,
            };
        };

        let total = state.filtered.len();
        let shown = (state.page.max(1) * self.page_size).min(total);
        let rows = match &state.layout {
            Some(layout) => state.filtered[..shown]
                .iter()
                .enumerate()
                .map(|(i, r)| ViewRow::build(i, r, &layout.columns))
                .collect(),
            None => Vec::new(),
        };
        let remaining = total - shown;

        TabView {
            status: state.status.clone(),
            layout: state.layout.clone(),
            rows,
            query: state.query.clone(),
            total,
            remaining,
            next_batch: remaining.min(self.page_size),
        }
    }

    /// Точка расширения для будущего редактора строк
    pub fn open_row(&self, tab: ProcessTab, index: usize) -> Option<RowEditRequest> {
        let tabs = self.tabs.borrow();
        let state = tabs.get(&tab)?;
        let payload = state.filtered.get(index)?.clone();
        let id_field = identifier_field(&payload).map(str::to_string);
        Some(RowEditRequest {
            tab,
            process_id: state.process_id.clone().unwrap_or_default(),
            payload,
            id_field,
        })
    }
}
