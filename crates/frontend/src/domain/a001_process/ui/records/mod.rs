//! Вкладки связанных записей процесса.
//!
//! Записи выводятся без схемы: до трёх колонок таблицей, больше карточками.

use super::use_console;
use crate::layout::global_context::use_global_context;
use crate::shared::components::ui::ReadonlyCheckbox;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use contracts::domain::a001_process::tabs::{ProcessTab, TabStatus, TabView};
use contracts::shared::record_view::{CellValue, DisplayMode, ViewRow};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use thaw::*;

fn render_cell(value: &CellValue, query: &str) -> AnyView {
    match value {
        CellValue::Text(text) => highlight_matches(text, query),
        CellValue::Checkbox(checked) => view! { <ReadonlyCheckbox checked=*checked /> }.into_any(),
    }
}

#[component]
pub fn RecordTabsPanel(process_id: String) -> impl IntoView {
    let console = use_console();
    let ctx = use_global_context();
    let active = RwSignal::new(ProcessTab::PersonalData);
    let loading = RwSignal::new(false);
    let process_id = StoredValue::new(process_id);

    let load = move |tab: ProcessTab| {
        active.set(tab);
        let core = console.get();
        let pid = process_id.get_value();
        // из кэша вкладка берётся без запроса, индикатор не нужен
        loading.set(!core.tabs.is_cached(tab, &pid));
        spawn_local(async move {
            if let Err(e) = core.tabs.load_tab(tab, &pid).await {
                log::warn!("Вкладка {} не загружена: {}", tab.name(), e);
            }
            // ответ по уже неактивной вкладке не снимает индикатор
            if active.get_untracked() == tab {
                loading.set(false);
            }
            console.touch();
        });
    };

    load(ProcessTab::PersonalData);

    let tab_view = Memo::new(move |_| console.read(|c| c.tabs.view(active.get())));

    let on_search = Callback::new(move |query: String| {
        console.get().tabs.filter(active.get_untracked(), &query);
        console.touch();
    });

    let on_row_click = move |index: usize| {
        let tab = active.get_untracked();
        if let Some(request) = console.get().tabs.open_row(tab, index) {
            log::debug!(
                "Строка вкладки {} процесса {}: поле id {:?}",
                request.tab.name(),
                request.process_id,
                request.id_field
            );
            ctx.info("Редактирование записей пока недоступно");
        }
    };

    let on_load_more = move |_: leptos::ev::MouseEvent| {
        if console.get().tabs.load_more(active.get_untracked()) {
            console.touch();
        }
    };

    view! {
        <div class="record-tabs">
            <div class="record-tabs__bar">
                {ProcessTab::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <Button
                            appearance=Signal::derive(move || {
                                if active.get() == tab {
                                    ButtonAppearance::Primary
                                } else {
                                    ButtonAppearance::Subtle
                                }
                            })
                            on_click=move |_| load(tab)
                        >
                            {tab.name()}
                        </Button>
                    })
                    .collect_view()}
            </div>

            // Поиск пересоздаётся при смене вкладки, чтобы взять её запрос
            {move || {
                let tab = active.get();
                view! {
                    <div class="record-tabs__search">
                        <SearchInput
                            value=Signal::derive(move || tab_view.get().query)
                            on_change=on_search
                            placeholder=format!("Поиск: {}", tab.name())
                            delay_ms=console.get().config.search_debounce_ms
                        />
                    </div>
                }
            }}

            <div class="record-tabs__content">
                {move || {
                    let current = tab_view.get();
                    if loading.get() || current.status == TabStatus::Loading {
                        return view! {
                            <div class="record-tabs__loading">
                                <Spinner label="Загрузка..." />
                            </div>
                        }
                        .into_any();
                    }
                    if let TabStatus::Failed(message) = current.status.clone() {
                        return view! {
                            <div class="warning-box warning-box--error" role="alert">
                                {format!("Ошибка загрузки: {}", message)}
                            </div>
                        }
                        .into_any();
                    }
                    render_records(current, on_row_click)
                }}
            </div>

            {move || {
                let current = tab_view.get();
                (current.remaining > 0).then(|| view! {
                    <div class="record-tabs__more">
                        <Button appearance=ButtonAppearance::Secondary on_click=on_load_more>
                            {format!("Показать ещё {}", current.next_batch)}
                        </Button>
                    </div>
                })
            }}
        </div>
    }
}

fn render_records(
    records: TabView,
    on_row_click: impl Fn(usize) + Copy + Send + Sync + 'static,
) -> AnyView {
    let Some(layout) = records.layout else {
        return view! { <div class="record-tabs__empty">"Нет записей"</div> }.into_any();
    };
    if records.rows.is_empty() {
        return view! {
            <div class="record-tabs__empty">
                {format!("Ничего не найдено по запросу «{}»", records.query)}
            </div>
        }
        .into_any();
    }

    let query = records.query;
    match layout.mode {
        DisplayMode::Table => view! {
            <table class="table record-table">
                <thead>
                    <tr>
                        {layout.columns.iter().map(|c| view! { <th>{c.clone()}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {records.rows.into_iter().map(|row| {
                        let index = row.index;
                        view! {
                            <tr class="record-table__row" on:click=move |_| on_row_click(index)>
                                {row.cells.iter().map(|cell| view! {
                                    <td>{render_cell(&cell.value, &query)}</td>
                                }).collect_view()}
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
        DisplayMode::Cards => view! {
            <div class="record-cards">
                {records.rows.into_iter().map(|row| render_card(row, &query, on_row_click)).collect_view()}
            </div>
        }
        .into_any(),
    }
}

fn render_card(
    row: ViewRow,
    query: &str,
    on_row_click: impl Fn(usize) + Copy + Send + Sync + 'static,
) -> AnyView {
    let index = row.index;
    let title = row
        .title()
        .map(|cell| render_cell(&cell.value, query))
        .unwrap_or_else(|| view! { <span></span> }.into_any());

    view! {
        <div class="record-card" on:click=move |_| on_row_click(index)>
            <div class="record-card__title">{title}</div>
            {row.details().iter().map(|cell| view! {
                <div class="record-card__line">
                    <span class="record-card__label">{format!("{}: ", cell.column)}</span>
                    {render_cell(&cell.value, query)}
                </div>
            }).collect_view()}
        </div>
    }
    .into_any()
}
