use super::details::{ProcessFormModal, ProcessFormVm};
use super::use_console;
use crate::layout::global_context::use_global_context;
use crate::shared::api_utils::scroll_to_top;
use crate::shared::components::{CardAnimated, PageHeader, PaginationControls};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use contracts::domain::a001_process::list_store::{EmptyState, ProcessCard};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use thaw::*;

/// Реестр процессов: поиск, сетка карточек, страницы и форма процесса
#[component]
#[allow(non_snake_case)]
pub fn ProcessRegistry() -> impl IntoView {
    let console = use_console();
    let ctx = use_global_context();
    let vm = ProcessFormVm::new();
    let (loading, set_loading) = signal(true);

    spawn_local(async move {
        match console.get().list.load().await {
            Ok(count) => log::info!("Загружено процессов: {}", count),
            Err(e) => {
                log::error!("Список процессов не загружен: {}", e);
                ctx.error(format!("Ошибка загрузки процессов: {}", e));
            }
        }
        set_loading.set(false);
        console.touch();
    });

    let counter = Signal::derive(move || {
        if loading.get() {
            None
        } else {
            console.read(|c| c.list.counter())
        }
    });
    let query = Signal::derive(move || console.read(|c| c.list.list().query().to_string()));
    let cards = Memo::new(move |_| console.read(|c| c.list.cards(&c.references.book())));
    let empty_state = Memo::new(move |_| console.read(|c| c.list.empty_state()));

    let on_search = Callback::new(move |q: String| {
        console.get().list.search(&q);
        console.touch();
    });

    let on_page_change = Callback::new(move |page: usize| {
        if console.get().list.go_to_page(page) {
            console.touch();
            scroll_to_top();
        }
    });

    view! {
        <div class="page process-registry">
            <PageHeader title="Реестр процессов" subtitle=counter>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.open_create()>
                    {icon("plus")}
                    " Новый процесс"
                </Button>
            </PageHeader>

            <div class="process-registry__search">
                <SearchInput
                    value=query
                    on_change=on_search
                    placeholder="Поиск по названию, id, группе..."
                    delay_ms=console.get().config.search_debounce_ms
                />
            </div>

            {move || {
                if loading.get() {
                    return view! {
                        <div class="process-registry__loading">
                            <Spinner label="Загрузка процессов..." />
                        </div>
                    }
                    .into_any();
                }
                match empty_state.get() {
                    Some(EmptyState::NoData) => view! {
                        <div class="empty-state">
                            <span class="empty-state__icon">{icon("inbox")}</span>
                            <div class="empty-state__title">"Процессов пока нет"</div>
                            <div class="empty-state__hint">"Создайте первый процесс кнопкой «Новый процесс»"</div>
                        </div>
                    }
                    .into_any(),
                    Some(EmptyState::NoResults(q)) => view! {
                        <div class="empty-state">
                            <span class="empty-state__icon">{icon("search")}</span>
                            <div class="empty-state__title">{format!("Ничего не найдено по запросу «{}»", q)}</div>
                        </div>
                    }
                    .into_any(),
                    None => {
                        let q = query.get();
                        view! {
                            <div class="process-grid">
                                {cards
                                    .get()
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, card)| render_card(card, &q, i, vm))
                                    .collect_view()}
                            </div>
                        }
                        .into_any()
                    }
                }
            }}

            <PaginationControls
                current_page=Signal::derive(move || console.read(|c| c.list.page()))
                total_pages=Signal::derive(move || console.read(|c| c.list.total_pages()))
                pages=Signal::derive(move || console.read(|c| c.list.visible_pages()))
                on_page_change=on_page_change
            />

            <ProcessFormModal vm=vm />
        </div>
    }
}

fn render_card(card: ProcessCard, query: &str, index: usize, vm: ProcessFormVm) -> impl IntoView {
    let ProcessCard {
        id,
        title,
        group,
        subjects,
        created_at,
        creator,
    } = card;
    let open_id = id.clone();
    let query = query.to_owned();

    view! {
        <div class="process-card" on:click=move |_| vm.open_edit(open_id.clone())>
            <CardAnimated delay_ms={index as u32 * 40} class="process-card__body">
                <div class="process-card__head">
                    <span class="process-card__icon">{icon("process")}</span>
                    <h3 class="process-card__title">{highlight_matches(&title, &query)}</h3>
                </div>
                <div class="process-card__id">"ID: " {highlight_matches(&id, &query)}</div>
                <div class="process-card__meta">
                    <div class="process-card__line">
                        <span class="process-card__label">"Группа: "</span>
                        {highlight_matches(&group, &query)}
                    </div>
                    <div class="process-card__line">
                        {icon("users")}
                        <span class="process-card__label">" Субъектов: "</span>
                        {subjects}
                    </div>
                </div>
                <div class="process-card__footer">
                    <span class="process-card__date">{icon("calendar")} " " {created_at}</span>
                    <span class="process-card__creator">{creator}</span>
                </div>
            </CardAnimated>
        </div>
    }
}
