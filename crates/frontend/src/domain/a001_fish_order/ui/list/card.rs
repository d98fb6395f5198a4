use crate::domain::a001_fish_order::api::update_order_status;
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use contracts::domain::a001_fish_order::aggregate::{FishOrder, OrderStatus};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

pub fn status_badge_color(status: OrderStatus) -> BadgeColor {
    match status {
        OrderStatus::Pending => BadgeColor::Warning,
        OrderStatus::Approved => BadgeColor::Success,
        OrderStatus::Rejected => BadgeColor::Danger,
    }
}

#[component]
pub fn StatusBadge(status: OrderStatus) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=status_badge_color(status)>
            {status.label()}
        </Badge>
    }
}

fn action_icon(target: OrderStatus) -> AnyView {
    match target {
        OrderStatus::Approved => icon("check"),
        OrderStatus::Rejected => icon("x"),
        OrderStatus::Pending => icon("rotate"),
    }
}

/// Карточка заказа в списке
#[component]
pub fn OrderCard(order: FishOrder, on_view: Callback<FishOrder>) -> impl IntoView {
    let created = format_timestamp(order.timestamp);
    let order_for_view = order.clone();

    let actions = order
        .status
        .list_actions()
        .iter()
        .map(|action| {
            let id = order.id.clone();
            let target = action.target;
            let appearance = if target == OrderStatus::Approved {
                ButtonAppearance::Primary
            } else {
                ButtonAppearance::Secondary
            };
            view! {
                <Button
                    appearance=appearance
                    on_click=move |_| update_order_status(id.clone(), target)
                >
                    {action_icon(target)}
                    {action.label}
                </Button>
            }
        })
        .collect_view();

    view! {
        <div class="order-card">
            <div class="order-card__header">
                <div>
                    <h3>{format!("{} #{}", FishOrder::element_name(), order.short_id())}</h3>
                    <p class="muted">{format!("Created: {}", created)}</p>
                    <StatusBadge status=order.status />
                </div>
                <div style="text-align: right;">
                    <p class="muted">"Amount to be Paid"</p>
                    <p style="font-weight: 700;">{order.format_amount()}</p>
                </div>
            </div>

            <div class="order-card__fields">
                <div class="order-card__row">
                    <span>"Fish Type"</span>
                    <span class="capitalize">{order.fish_type.clone()}</span>
                </div>
                <div class="order-card__row">
                    <span>"Stock Weight"</span>
                    <span>{order.format_weight()}</span>
                </div>
                <div class="order-card__row">
                    <span>"Location"</span>
                    <span class="capitalize">{order.location.clone()}</span>
                </div>
                <div class="order-card__row">
                    <span>"User ID"</span>
                    <span class="muted">{order.user_uuid.clone()}</span>
                </div>
                <div class="order-card__row">
                    <span>"Agent ID"</span>
                    <span class="muted">{order.agent_uuid.clone()}</span>
                </div>
            </div>

            <div class="order-card__actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| on_view.run(order_for_view.clone())
                >
                    {icon("eye")}
                    "View Details"
                </Button>
                {actions}
            </div>
        </div>
    }
}
