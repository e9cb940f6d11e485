//! Карточка thaw с анимацией появления `card-appear`.
//! Для сетки карточек задержка растёт с позицией: `delay_ms = index * 40`.

use leptos::prelude::*;
use thaw::Card;

#[component]
pub fn CardAnimated(
    /// Задержка анимации, мс
    #[prop(optional)]
    delay_ms: u32,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let style = format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms);

    view! {
        <Card class=class attr:style=style>
            {children()}
        </Card>
    }
}
