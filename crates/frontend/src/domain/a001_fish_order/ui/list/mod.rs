pub mod card;
pub mod state;

use self::card::OrderCard;
use self::state::create_state;
use crate::domain::a001_fish_order::live::LiveSubscription;
use crate::domain::a001_fish_order::ui::details::{FishOrderDetails, FishOrderDetailsViewModel};
use crate::shared::icons::icon;
use contracts::domain::a001_fish_order::aggregate::{FishOrder, StatusFilter};
use leptos::prelude::*;
use thaw::*;

/// Доска заказов: вкладки pending / approved / rejected, у каждой своя live query
#[component]
pub fn SupplyOrders() -> impl IntoView {
    let initial = StatusFilter::Pending;
    // Значение вкладки: её индекс ("0", "1", "2")
    let selected_tab = RwSignal::new(initial.tab_index().to_string());
    let filter = Memo::new(move |_| {
        let index = selected_tab.get().parse::<usize>().unwrap_or(usize::MAX);
        StatusFilter::from_tab_index(index)
    });

    let board = create_state(initial);
    let details = FishOrderDetailsViewModel::new();

    // Текущая подписка. Замена значения закрывает предыдущий сокет.
    let subscription = StoredValue::new_local(None::<LiveSubscription>);

    Effect::new(move |_| {
        let current = filter.get();
        board.update(|b| b.reset(current));
        subscription.set_value(None);

        match LiveSubscription::open(current, move |msg| {
            board.maybe_update(|b| b.apply(msg));
        }) {
            Ok(live) => subscription.set_value(Some(live)),
            Err(e) => log::error!("Failed to open live query {}: {}", current.as_str(), e),
        }
    });

    on_cleanup(move || {
        let _ = subscription.try_update_value(|s| s.take());
    });

    let on_view = Callback::new(move |order: FishOrder| details.open_for(order));

    view! {
        <div class="supply-orders">
            <div class="supply-orders__header">
                {icon("fish")}
                <h2>"Supply Orders"</h2>
            </div>

            <TabList selected_value=selected_tab>
                {StatusFilter::TABS
                    .into_iter()
                    .map(|tab| {
                        view! { <Tab value=tab.tab_index().to_string()>{tab.tab_label()}</Tab> }
                    })
                    .collect_view()}
            </TabList>

            <div class="supply-orders__list">
                {move || {
                    let state = board.get();
                    if !state.is_loaded {
                        return view! { <p class="supply-orders__empty">"Loading..."</p> }.into_any();
                    }
                    if state.orders.is_empty() {
                        return view! { <p class="supply-orders__empty">"No fish orders found"</p> }.into_any();
                    }
                    state
                        .orders
                        .into_iter()
                        .map(|order| view! { <OrderCard order=order on_view=on_view /> })
                        .collect_view()
                        .into_any()
                }}
            </div>

            <FishOrderDetails vm=details />
        </div>
    }
}
