use super::view_model::{detail_sections, FishOrderDetailsViewModel};
use crate::domain::a001_fish_order::ui::list::card::StatusBadge;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn FishOrderDetails(vm: FishOrderDetailsViewModel) -> impl IntoView {
    let sections = move || {
        vm.order
            .get()
            .map(|order| {
                detail_sections(&order)
                    .into_iter()
                    .map(|section| {
                        view! {
                            <div class="order-details__section">
                                <h4>{section.title}</h4>
                                {section
                                    .rows
                                    .into_iter()
                                    .map(|(label, value)| {
                                        view! {
                                            <div class="order-details__row">
                                                {(!label.is_empty())
                                                    .then(|| {
                                                        view! {
                                                            <span class="muted">{format!("{}:", label)}</span>
                                                        }
                                                    })}
                                                <span class="capitalize">{value}</span>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
                    .collect_view()
            })
    };

    // Кнопки смены статуса есть только у pending
    let actions = move || {
        vm.order.get().map(|order| {
            order
                .status
                .dialog_actions()
                .iter()
                .map(|action| {
                    let target = action.target;
                    view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.apply_action(target)
                        >
                            {action.label}
                        </Button>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <Dialog open=vm.open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        <div class="order-details__title">
                            {move || vm.title()}
                            {move || vm.order.get().map(|o| view! { <StatusBadge status=o.status /> })}
                        </div>
                    </DialogTitle>
                    <DialogContent>
                        <div class="order-details">{sections}</div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.close()
                        >
                            "Close"
                        </Button>
                        {actions}
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
