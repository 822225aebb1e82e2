//! Prompt texts, option sets and keyboards.
//!
//! Everything here is static; the transport turns [`Keyboard`] into inline
//! buttons and sends [`Reply::text`] as HTML.

use crate::conversation::{Conversation, Step};
use crate::flow::Flow;

/// Callback data of the "leave a request" button.
pub const NEW_ORDER: &str = "new_order";
/// Callback data of the back button.
pub const BACK: &str = "back";
/// Callback data of the cancel button.
pub const CANCEL: &str = "cancel";
/// Callback data of the confirm button.
pub const CONFIRM: &str = "confirm";

pub const WELCOME: &str = "👋 Добро пожаловать! Нажмите кнопку ниже, чтобы оставить заявку.";
pub const CANCELLED: &str = "⚠️ Заявка отменена.";
pub const SUBMITTED: &str = "✅ Заявка принята и сохранена.";
pub const SUBMISSION_FAILED: &str =
    "❌ Ошибка при сохранении. Попробуйте позже: нажмите /start, чтобы оформить заявку заново.";
pub const USE_BUTTONS: &str = "Пожалуйста, выберите вариант с помощью кнопок.";
pub const STALE_BUTTON: &str = "Эта кнопка больше не активна.";

/// One selectable option: callback code and the value stored for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    pub code: &'static str,
    pub label: &'static str,
}

pub const CONTACT_WINDOWS: &[ChoiceOption] = &[
    ChoiceOption { code: "time_today_14_16", label: "Сегодня 14:00-16:00" },
    ChoiceOption { code: "time_today_16_18", label: "Сегодня 16:00-18:00" },
    ChoiceOption { code: "time_tomorrow_10_12", label: "Завтра 10:00-12:00" },
    ChoiceOption { code: "time_tomorrow_12_14", label: "Завтра 12:00-14:00" },
];

pub const SERVICES: &[ChoiceOption] = &[
    ChoiceOption { code: "service_accounting", label: "Бухгалтерское обслуживание" },
    ChoiceOption { code: "service_registration", label: "Регистрация ИП/ООО" },
    ChoiceOption { code: "service_reporting", label: "Сдача отчетности" },
    ChoiceOption { code: "service_consultation", label: "Консультация" },
    ChoiceOption { code: "service_other", label: "Другое" },
];

pub const URGENCIES: &[ChoiceOption] = &[
    ChoiceOption { code: "urgency_normal", label: "Обычная" },
    ChoiceOption { code: "urgency_urgent", label: "Срочно" },
];

/// An inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Rows of inline buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Adds a row.
    pub fn row(mut self, buttons: Vec<Button>) -> Self {
        self.rows.push(buttons);
        self
    }

    /// Callback data of every button, row by row.
    pub fn codes(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .map(|b| b.data.as_str())
            .collect()
    }
}

/// An outbound message: HTML text plus optional buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    /// Prefixes the text with an error line, keeping the buttons.
    pub fn annotated(mut self, error: &str) -> Self {
        self.text = format!("❗️ {}\n\n{}", escape_html(error), self.text);
        self
    }
}

/// Escapes text for Telegram's HTML parse mode.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Welcome message with the "leave a request" button.
pub fn welcome() -> Reply {
    Reply::text(WELCOME)
        .with_keyboard(Keyboard::default().row(vec![Button::new("Оставить заявку", NEW_ORDER)]))
}

fn navigation_row(flow: &Flow, step: Step) -> Vec<Button> {
    let mut row = Vec::with_capacity(2);
    if !flow.is_first(step) {
        row.push(Button::new("⬅️ Назад", BACK));
    }
    row.push(Button::new("❌ Отмена", CANCEL));
    row
}

fn option_rows(options: &[ChoiceOption], per_row: usize) -> Vec<Vec<Button>> {
    options
        .chunks(per_row)
        .map(|chunk| {
            chunk
                .iter()
                .map(|o| Button::new(o.label, o.code))
                .collect()
        })
        .collect()
}

fn question(step: Step) -> &'static str {
    match step {
        Step::AwaitingTaxId => "Введите ИНН (10 или 12 цифр):",
        Step::AwaitingEmail => "Введите ваш Email:",
        Step::AwaitingName => "Введите ваше имя:",
        Step::AwaitingPhone => "Введите ваш телефон (+7XXXXXXXXXX или 8XXXXXXXXXX):",
        Step::AwaitingContactWindow => "Выберите желаемое время для связи:",
        Step::AwaitingService => "Выберите услугу:",
        Step::AwaitingUrgency => "Укажите срочность:",
        Step::Idle | Step::Confirming => "",
    }
}

/// Summary of the collected answers, one `Label: value` line per field.
pub fn summary_lines(flow: &Flow, conversation: &Conversation) -> String {
    flow.fields()
        .into_iter()
        .filter_map(|field| {
            conversation
                .get(field)
                .map(|v| format!("{}: <code>{}</code>", field.label(), escape_html(v)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt for the step the conversation is at.
pub fn prompt(flow: &Flow, conversation: &Conversation) -> Reply {
    let step = conversation.step;
    match step {
        Step::Idle => welcome(),
        Step::Confirming => {
            let text = format!(
                "<b>Проверьте данные:</b>\n{}\n\nВсе верно?",
                summary_lines(flow, conversation)
            );
            let keyboard = Keyboard::default()
                .row(vec![Button::new("✅ Да, отправить", CONFIRM)])
                .row(navigation_row(flow, step));
            Reply::text(text).with_keyboard(keyboard)
        }
        Step::AwaitingContactWindow => choice_prompt(flow, step, CONTACT_WINDOWS, 2),
        Step::AwaitingService => choice_prompt(flow, step, SERVICES, 1),
        Step::AwaitingUrgency => choice_prompt(flow, step, URGENCIES, 2),
        Step::AwaitingTaxId | Step::AwaitingEmail | Step::AwaitingName | Step::AwaitingPhone => {
            Reply::text(question(step))
                .with_keyboard(Keyboard::default().row(navigation_row(flow, step)))
        }
    }
}

fn choice_prompt(flow: &Flow, step: Step, options: &[ChoiceOption], per_row: usize) -> Reply {
    let mut keyboard = Keyboard {
        rows: option_rows(options, per_row),
    };
    keyboard.rows.push(navigation_row(flow, step));
    Reply::text(question(step)).with_keyboard(keyboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Field;

    #[test]
    fn test_first_step_has_no_back_button() {
        let flow = Flow::new(true);
        let reply = prompt(&flow, &Conversation::new(Step::AwaitingTaxId));
        assert_eq!(reply.text, "Введите ИНН (10 или 12 цифр):");
        assert_eq!(reply.keyboard.unwrap().codes(), vec![CANCEL]);
    }

    #[test]
    fn test_text_steps_offer_back_and_cancel() {
        let flow = Flow::new(true);
        let reply = prompt(&flow, &Conversation::new(Step::AwaitingPhone));
        assert_eq!(reply.keyboard.unwrap().codes(), vec![BACK, CANCEL]);
    }

    #[test]
    fn test_choice_steps_list_options() {
        let flow = Flow::new(true);
        let reply = prompt(&flow, &Conversation::new(Step::AwaitingService));
        let keyboard = reply.keyboard.unwrap();
        // one service per row, navigation last
        assert_eq!(keyboard.rows.len(), SERVICES.len() + 1);
        assert_eq!(keyboard.codes()[0], "service_accounting");
        assert_eq!(keyboard.rows.last().unwrap().len(), 2);
    }

    #[test]
    fn test_contact_windows_two_per_row() {
        let flow = Flow::new(false);
        let reply = prompt(&flow, &Conversation::new(Step::AwaitingContactWindow));
        let keyboard = reply.keyboard.unwrap();
        assert_eq!(keyboard.rows[0].len(), 2);
        assert_eq!(keyboard.rows[1].len(), 2);
    }

    #[test]
    fn test_callback_codes_fit_telegram_limit() {
        for option in CONTACT_WINDOWS.iter().chain(SERVICES).chain(URGENCIES) {
            assert!(option.code.len() <= 64, "{} too long", option.code);
        }
    }

    #[test]
    fn test_confirmation_summary_escapes_values() {
        let flow = Flow::new(true);
        let mut conversation = Conversation::new(Step::Confirming);
        conversation.set(Field::TaxId, "1234567890");
        conversation.set(Field::Name, "<b>Ann</b> & Co");

        let reply = prompt(&flow, &conversation);
        assert!(reply.text.starts_with("<b>Проверьте данные:</b>"));
        assert!(reply.text.contains("ИНН: <code>1234567890</code>"));
        assert!(reply.text.contains("Имя: <code>&lt;b&gt;Ann&lt;/b&gt; &amp; Co</code>"));
        assert_eq!(reply.keyboard.unwrap().codes(), vec![CONFIRM, BACK, CANCEL]);
    }

    #[test]
    fn test_annotated_keeps_keyboard() {
        let flow = Flow::new(true);
        let reply = prompt(&flow, &Conversation::new(Step::AwaitingEmail)).annotated("bad <input>");
        assert!(reply.text.starts_with("❗️ bad &lt;input&gt;\n\nВведите ваш Email:"));
        assert!(reply.keyboard.is_some());
    }

    #[test]
    fn test_welcome_button() {
        assert_eq!(welcome().keyboard.unwrap().codes(), vec![NEW_ORDER]);
    }
}
