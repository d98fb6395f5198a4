use crate::shared::api_utils::ws_url;
use contracts::domain::a001_fish_order::aggregate::{FishOrder, StatusFilter};
use contracts::domain::a001_fish_order::live::LiveQueryMessage;
use contracts::domain::common::AggregateRoot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

/// Открытая live query подписка. Drop закрывает сокет: это и есть отмена.
pub struct LiveSubscription {
    filter: StatusFilter,
    socket: WebSocket,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl LiveSubscription {
    /// Подписаться на коллекцию с фильтром по статусу
    pub fn open(
        filter: StatusFilter,
        on_update: impl Fn(LiveQueryMessage) + 'static,
    ) -> Result<Self, String> {
        let url = ws_url(&format!(
            "/api/{}/live?status={}",
            FishOrder::collection_name(),
            filter.as_str()
        ));
        let socket = WebSocket::new(&url).map_err(|e| format!("{e:?}"))?;

        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                log::warn!("Live query {}: non-text frame ignored", filter.as_str());
                return;
            };
            match LiveQueryMessage::from_json(&text) {
                Ok(msg) => on_update(msg),
                Err(e) => log::error!("Live query {}: bad message: {}", filter.as_str(), e),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            if !event.was_clean() {
                log::warn!(
                    "Live query {} closed unexpectedly (code {})",
                    filter.as_str(),
                    event.code()
                );
            }
        }) as Box<dyn FnMut(CloseEvent)>);
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        log::debug!("Live query {} opened", filter.as_str());
        Ok(Self {
            filter,
            socket,
            _on_message: on_message,
            _on_close: on_close,
        })
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        let _ = self.socket.close();
        log::debug!("Live query {} cancelled", self.filter.as_str());
    }
}
