/// Toast notifications
///
/// Toasts stack in the top-right corner. Each one closes itself after
/// `TOAST_TIMEOUT` (the app schedules that) or when clicked.

use std::time::Duration;

use iced::widget::{column, container, mouse_area, stack, text};
use iced::{Alignment, Background, Border, Color, Element, Length};

use crate::Message;

/// How long a toast stays on screen
pub const TOAST_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: Kind,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast and return its id
    pub fn push(&mut self, kind: Kind, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            text: text.into(),
        });
        id
    }

    /// Remove a toast. Unknown ids are ignored (already clicked away).
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Draw `toasts` on top of `base`
pub fn overlay<'a>(base: Element<'a, Message>, toasts: &'a Toasts) -> Element<'a, Message> {
    if toasts.is_empty() {
        return base;
    }

    let cards = toasts.iter().map(|toast| {
        let accent = match toast.kind {
            Kind::Info => Color::from_rgb8(0x34, 0x98, 0xdb),
            Kind::Error => Color::from_rgb8(0xe7, 0x4c, 0x3c),
        };
        let card = container(text(&toast.text).size(15).color(Color::WHITE))
            .padding(12)
            .width(Length::Fixed(320.0))
            .style(move |_theme| container::Style {
                background: Some(Background::Color(Color::from_rgb8(0x22, 0x22, 0x22))),
                border: Border {
                    color: accent,
                    width: 2.0,
                    radius: 6.0.into(),
                },
                ..container::Style::default()
            });
        let card: Element<'a, Message> = mouse_area(card)
            .on_press(Message::DismissToast(toast.id))
            .into();
        card
    });

    let layer = container(column(cards).spacing(8).align_x(Alignment::End))
        .padding(16)
        .width(Length::Fill)
        .align_x(Alignment::End);

    stack![base, layer].into()
}
