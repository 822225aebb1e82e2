//! Scenario tests driving the wizard with mock gateway and notifier.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kuzka_bot::catalog::{self, CANCELLED, STALE_BUTTON, SUBMISSION_FAILED, SUBMITTED, USE_BUTTONS};
use kuzka_bot::{
    Action, BotError, ConversationId, Field, Flow, Notifier, Outcome, Step, SubmissionGateway,
    Wizard,
};
use kuzka_bot::flow::StepKind;
use kuzka_models::LeadSubmission;

#[derive(Default)]
struct MockGateway {
    calls: AtomicUsize,
    fail: bool,
    received: Mutex<Vec<LeadSubmission>>,
}

#[async_trait]
impl SubmissionGateway for MockGateway {
    async fn submit(&self, submission: &LeadSubmission) -> kuzka_bot::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(submission.clone());
        if self.fail {
            Err(BotError::SubmissionFailed("storage unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
struct MockNotifier {
    calls: AtomicUsize,
    fail: bool,
    received: Mutex<Vec<LeadSubmission>>,
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, submission: &LeadSubmission) -> kuzka_bot::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(submission.clone());
        if self.fail {
            Err(BotError::TelegramError("chat not found".into()))
        } else {
            Ok(())
        }
    }
}

struct Harness {
    wizard: Wizard,
    gateway: Arc<MockGateway>,
    notifier: Arc<MockNotifier>,
}

fn harness_with(collect_name: bool, gateway: MockGateway, notifier: MockNotifier) -> Harness {
    let gateway = Arc::new(gateway);
    let notifier = Arc::new(notifier);
    let wizard = Wizard::new(
        Flow::new(collect_name),
        gateway.clone(),
        notifier.clone(),
    );
    Harness {
        wizard,
        gateway,
        notifier,
    }
}

fn harness() -> Harness {
    harness_with(true, MockGateway::default(), MockNotifier::default())
}

const CHAT: ConversationId = ConversationId(42);

async fn send(h: &Harness, action: Action) -> Outcome {
    h.wizard.handle(CHAT, action).await
}

async fn text(h: &Harness, input: &str) -> String {
    send(h, Action::Text(input.to_string()))
        .await
        .reply()
        .expect("text always gets a reply")
        .text
        .clone()
}

async fn choose(h: &Harness, code: &str) -> Outcome {
    send(h, Action::Choice(code.to_string())).await
}

/// Fills the form up to the confirmation step.
async fn fill_form(h: &Harness) {
    send(h, Action::Start).await;
    text(h, "1234567890").await;
    text(h, "a@b.ru").await;
    if h.wizard.flow().collects_name() {
        text(h, "Иван").await;
    }
    text(h, "+79991234567").await;
    choose(h, "time_today_14_16").await;
    choose(h, "service_accounting").await;
    choose(h, "urgency_normal").await;
    assert_eq!(h.wizard.step(CHAT).await, Step::Confirming);
}

#[tokio::test]
async fn test_happy_path_submits_once_and_notifies() {
    let h = harness();
    fill_form(&h).await;

    let summary = h.wizard.store().get(CHAT).await.unwrap();
    assert_eq!(summary.get(Field::ContactWindow), Some("Сегодня 14:00-16:00"));

    let outcome = send(&h, Action::Confirm).await;
    assert_eq!(outcome.reply().unwrap().text, SUBMITTED);
    assert_eq!(h.wizard.step(CHAT).await, Step::Idle);

    assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 1);

    let expected = LeadSubmission {
        inn: "1234567890".into(),
        email: "a@b.ru".into(),
        name: Some("Иван".into()),
        phone: "+79991234567".into(),
        contact_time: "Сегодня 14:00-16:00".into(),
        service: "Бухгалтерское обслуживание".into(),
        urgency: "Обычная".into(),
    };
    assert_eq!(*h.gateway.received.lock().unwrap(), vec![expected.clone()]);
    assert_eq!(*h.notifier.received.lock().unwrap(), vec![expected]);
}

#[tokio::test]
async fn test_invalid_tax_id_keeps_step() {
    let h = harness();
    send(&h, Action::Start).await;

    for bad in ["12345", "12345678901", "12345abcde", "１２３４５６７８９０"] {
        let reply = text(&h, bad).await;
        assert!(reply.contains("ИНН должен быть 10 или 12 цифр."), "{bad}");
        assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingTaxId);
    }

    text(&h, "123456789012").await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingEmail);
}

#[tokio::test]
async fn test_input_is_trimmed() {
    let h = harness();
    send(&h, Action::Start).await;
    text(&h, "  1234567890 ").await;

    let conversation = h.wizard.store().get(CHAT).await.unwrap();
    assert_eq!(conversation.get(Field::TaxId), Some("1234567890"));
}

#[tokio::test]
async fn test_invalid_email_and_phone() {
    let h = harness();
    send(&h, Action::Start).await;
    text(&h, "1234567890").await;

    let reply = text(&h, "no-at-sign").await;
    assert!(reply.starts_with("❗️ Некорректный email."));
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingEmail);

    text(&h, "a@b.ru").await;
    let reply = text(&h, "И").await;
    assert!(reply.contains("Имя должно быть минимум 2 символа."));
    text(&h, "Ив").await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingPhone);

    for bad in ["+7999123456", "79991234567", "+7 999 123 45 67"] {
        let reply = text(&h, bad).await;
        assert!(reply.contains("Неверный формат."), "{bad}");
    }
    text(&h, "89991234567").await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingContactWindow);
}

#[tokio::test]
async fn test_back_preserves_values() {
    let h = harness();
    send(&h, Action::Start).await;
    text(&h, "1234567890").await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingEmail);

    let outcome = send(&h, Action::Back).await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingTaxId);
    assert!(outcome.reply().unwrap().text.contains("Введите ИНН"));

    let conversation = h.wizard.store().get(CHAT).await.unwrap();
    assert_eq!(conversation.get(Field::TaxId), Some("1234567890"));

    // re-entering overwrites only this step's value
    text(&h, "098765432109").await;
    let conversation = h.wizard.store().get(CHAT).await.unwrap();
    assert_eq!(conversation.get(Field::TaxId), Some("098765432109"));
    assert_eq!(conversation.len(), 1);
}

#[tokio::test]
async fn test_back_from_first_step_is_stale() {
    let h = harness();
    send(&h, Action::Start).await;
    assert!(send(&h, Action::Back).await.is_stale());
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingTaxId);
}

#[tokio::test]
async fn test_back_from_confirmation() {
    let h = harness();
    fill_form(&h).await;
    send(&h, Action::Back).await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingUrgency);

    choose(&h, "urgency_urgent").await;
    send(&h, Action::Confirm).await;
    assert_eq!(h.gateway.received.lock().unwrap()[0].urgency, "Срочно");
}

/// Walks a fresh conversation forward until it reaches `target`.
async fn advance_to(h: &Harness, target: Step) {
    send(h, Action::Start).await;
    let inputs: [(Step, &str); 7] = [
        (Step::AwaitingTaxId, "1234567890"),
        (Step::AwaitingEmail, "a@b.ru"),
        (Step::AwaitingName, "Иван"),
        (Step::AwaitingPhone, "+79991234567"),
        (Step::AwaitingContactWindow, "time_today_14_16"),
        (Step::AwaitingService, "service_accounting"),
        (Step::AwaitingUrgency, "urgency_normal"),
    ];
    for (step, input) in inputs {
        if h.wizard.step(CHAT).await == target {
            return;
        }
        assert_eq!(h.wizard.step(CHAT).await, step);
        match step.kind() {
            StepKind::Choice { .. } => {
                choose(h, input).await;
            }
            _ => {
                text(h, input).await;
            }
        }
    }
    assert_eq!(h.wizard.step(CHAT).await, target);
}

#[tokio::test]
async fn test_cancel_clears_and_nothing_leaks() {
    let steps = Flow::new(true).steps().to_vec();
    assert!(steps.contains(&Step::Confirming));

    for step in steps {
        let h = harness();
        advance_to(&h, step).await;
        assert_eq!(h.wizard.step(CHAT).await, step);

        let outcome = send(&h, Action::Cancel).await;
        assert_eq!(outcome.reply().unwrap().text, CANCELLED, "{step:?}");
        assert_eq!(h.wizard.step(CHAT).await, Step::Idle, "{step:?}");
        assert!(h.wizard.store().is_empty().await, "{step:?}");

        send(&h, Action::Start).await;
        let conversation = h.wizard.store().get(CHAT).await.unwrap();
        assert!(conversation.is_empty(), "{step:?}");
        assert!(send(&h, Action::Confirm).await.is_stale(), "{step:?}");
        assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 0, "{step:?}");
        assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 0, "{step:?}");
    }
}

#[tokio::test]
async fn test_cancel_while_idle_acknowledges() {
    let h = harness();
    let outcome = send(&h, Action::Cancel).await;
    assert_eq!(outcome.reply().unwrap().text, CANCELLED);
    assert_eq!(h.wizard.step(CHAT).await, Step::Idle);
}

#[tokio::test]
async fn test_restart_mid_form_clears_fields() {
    let h = harness();
    send(&h, Action::Start).await;
    text(&h, "1234567890").await;

    send(&h, Action::Start).await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingTaxId);
    assert!(h.wizard.store().get(CHAT).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_welcome_resets() {
    let h = harness();
    send(&h, Action::Start).await;
    text(&h, "1234567890").await;

    let outcome = send(&h, Action::Welcome).await;
    assert_eq!(outcome.reply().unwrap().text, catalog::WELCOME);
    assert_eq!(h.wizard.step(CHAT).await, Step::Idle);
}

#[tokio::test]
async fn test_text_while_idle_gets_welcome() {
    let h = harness();
    let reply = text(&h, "hello").await;
    assert_eq!(reply, catalog::WELCOME);
    assert!(h.wizard.store().is_empty().await);
}

#[tokio::test]
async fn test_text_at_choice_step_asks_for_buttons() {
    let h = harness();
    send(&h, Action::Start).await;
    text(&h, "1234567890").await;
    text(&h, "a@b.ru").await;
    text(&h, "Иван").await;
    text(&h, "+79991234567").await;

    let reply = text(&h, "завтра утром").await;
    assert!(reply.contains(USE_BUTTONS));
    assert!(reply.contains("Выберите желаемое время для связи:"));
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingContactWindow);
}

#[tokio::test]
async fn test_text_at_confirmation_reshows_summary() {
    let h = harness();
    fill_form(&h).await;

    let reply = text(&h, "да").await;
    assert!(reply.contains(USE_BUTTONS));
    assert!(reply.contains("Проверьте данные"));
    assert_eq!(h.wizard.step(CHAT).await, Step::Confirming);
    assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_stale_choice_changes_nothing() {
    let h = harness();
    send(&h, Action::Start).await;
    text(&h, "1234567890").await;
    text(&h, "a@b.ru").await;
    text(&h, "Иван").await;
    text(&h, "+79991234567").await;

    // service button while the contact window is asked
    assert!(choose(&h, "service_other").await.is_stale());
    assert!(choose(&h, "bogus").await.is_stale());
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingContactWindow);
    assert!(h.wizard.store().get(CHAT).await.unwrap().get(Field::Service).is_none());

    // option button on a text step
    send(&h, Action::Back).await;
    assert!(choose(&h, "time_today_16_18").await.is_stale());
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingPhone);
}

#[tokio::test]
async fn test_confirm_outside_confirmation_is_stale() {
    let h = harness();
    assert!(send(&h, Action::Confirm).await.is_stale());

    send(&h, Action::Start).await;
    assert!(send(&h, Action::Confirm).await.is_stale());
    assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 0);
    assert!(!STALE_BUTTON.is_empty());
}

#[tokio::test]
async fn test_repeated_confirm_submits_once() {
    let h = harness();
    fill_form(&h).await;

    send(&h, Action::Confirm).await;
    assert!(send(&h, Action::Confirm).await.is_stale());
    assert!(send(&h, Action::Confirm).await.is_stale());

    assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_submission_failure_skips_notifier() {
    let gateway = MockGateway {
        fail: true,
        ..Default::default()
    };
    let h = harness_with(true, gateway, MockNotifier::default());
    fill_form(&h).await;

    let outcome = send(&h, Action::Confirm).await;
    assert_eq!(outcome.reply().unwrap().text, SUBMISSION_FAILED);
    assert_eq!(h.wizard.step(CHAT).await, Step::Idle);
    assert_eq!(h.gateway.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_notifier_failure_still_reports_success() {
    let notifier = MockNotifier {
        fail: true,
        ..Default::default()
    };
    let h = harness_with(true, MockGateway::default(), notifier);
    fill_form(&h).await;

    let outcome = send(&h, Action::Confirm).await;
    assert_eq!(outcome.reply().unwrap().text, SUBMITTED);
    assert_eq!(h.notifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_flow_without_name_step() {
    let h = harness_with(false, MockGateway::default(), MockNotifier::default());
    send(&h, Action::Start).await;
    text(&h, "1234567890").await;
    text(&h, "a@b.ru").await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingPhone);

    send(&h, Action::Back).await;
    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingEmail);
    text(&h, "c@d.ru").await;

    fill_form(&h).await;
    let outcome = send(&h, Action::Confirm).await;
    assert!(outcome.reply().is_some());

    let submitted = h.gateway.received.lock().unwrap();
    let notified = h.notifier.received.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(*notified, *submitted);
    assert!(submitted[0].name.is_none());
    assert_eq!(submitted[0].email, "a@b.ru");
}

#[tokio::test]
async fn test_conversations_do_not_interfere() {
    let h = harness();
    let other = ConversationId(7);

    send(&h, Action::Start).await;
    h.wizard.handle(other, Action::Start).await;
    text(&h, "1234567890").await;

    assert_eq!(h.wizard.step(CHAT).await, Step::AwaitingEmail);
    assert_eq!(h.wizard.step(other).await, Step::AwaitingTaxId);
    assert!(h.wizard.store().get(other).await.unwrap().is_empty());
}
