use crate::domain::a001_fish_order::ui::list::SupplyOrders;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <SupplyOrders />
        </ConfigProvider>
    }
}
