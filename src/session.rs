//! Maps terminal input onto engine operations.

use crate::engine::{EngineState, PageLayout};
use crate::error::QuizError;
use crate::models::Mode;
use crate::ui::{Button, button_at, calculate_quiz_chunks};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Apply one input event against the page the user is looking at.
pub fn handle_event(
    engine: &mut EngineState,
    event: Event,
    page: &PageLayout,
    now: Instant,
) -> Result<Control, QuizError> {
    match event {
        Event::Key(key) => handle_key(engine, key, page, now),
        Event::Mouse(mouse) => {
            handle_mouse(engine, mouse, page, now)?;
            Ok(Control::Continue)
        }
        // The next frame re-lays out and re-clamps against the new size.
        _ => Ok(Control::Continue),
    }
}

pub fn handle_key(
    engine: &mut EngineState,
    key: KeyEvent,
    page: &PageLayout,
    now: Instant,
) -> Result<Control, QuizError> {
    if key.kind != KeyEventKind::Press {
        return Ok(Control::Continue);
    }

    let step = page.metrics.wheel_step as i32;
    let screen = page.viewport.height.saturating_sub(page.metrics.footer_allowance).max(1) as i32;

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Ok(Control::Quit);
        }
        KeyCode::Char('q') | KeyCode::Esc => return Ok(Control::Quit),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            engine.select_option(index, now);
        }
        KeyCode::Enter | KeyCode::Char(' ') => engine.dismiss_feedback()?,
        KeyCode::Char('s') => {
            engine.skip()?;
        }
        KeyCode::Char('p') => engine.set_mode(Mode::Practice)?,
        KeyCode::Char('a') => engine.set_mode(Mode::Arcade)?,
        KeyCode::Up => engine.scroll_by(step, page),
        KeyCode::Down => engine.scroll_by(-step, page),
        KeyCode::PageUp => engine.scroll_by(screen, page),
        KeyCode::PageDown => engine.scroll_by(-screen, page),
        KeyCode::Home => engine.scroll_to_top(),
        KeyCode::End => engine.scroll_to_bottom(page),
        _ => {}
    }
    Ok(Control::Continue)
}

fn press_button(engine: &mut EngineState, button: Button) -> Result<(), QuizError> {
    match button {
        Button::Font(class, adjust) => engine.adjust_font(class, adjust),
        Button::Mode(mode) => engine.set_mode(mode)?,
        Button::Skip => {
            engine.skip()?;
        }
    }
    Ok(())
}

/// Press order: scrollbar thumb, footer buttons, then the page body.
/// The thumb only grabs while asking and above the footer.
pub fn handle_mouse(
    engine: &mut EngineState,
    mouse: MouseEvent,
    page: &PageLayout,
    now: Instant,
) -> Result<(), QuizError> {
    let x = i32::from(mouse.column);
    let y = i32::from(mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let area = Rect::new(
                0,
                0,
                u16::try_from(page.viewport.width).unwrap_or(u16::MAX),
                u16::try_from(page.viewport.height).unwrap_or(u16::MAX),
            );
            let footer_top = calculate_quiz_chunks(area).stats_area.y;
            let asking = engine.feedback().is_asking();

            if asking && mouse.row < footer_top && engine.begin_drag(page, x, y) {
                return Ok(());
            }
            let show_skip = engine.config().enable_skip_button;
            if let Some(button) = button_at(area, show_skip, mouse.column, mouse.row) {
                return press_button(engine, button);
            }
            // Answer boxes scrolled under the footer are not clickable.
            if mouse.row >= footer_top && asking {
                return Ok(());
            }
            engine.click(page, x, y, now)?;
        }
        MouseEventKind::Drag(MouseButton::Left) => engine.drag_to(page, y),
        MouseEventKind::Up(MouseButton::Left) => engine.end_drag(),
        MouseEventKind::ScrollUp => engine.scroll_by(page.metrics.wheel_step as i32, page),
        MouseEventKind::ScrollDown => engine.scroll_by(-(page.metrics.wheel_step as i32), page),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::layout::{CellMeasure, FontClass, LayoutMetrics, Viewport};
    use crate::models::{Question, QuestionBank, Verdict};
    use crate::store::QuestionStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn long_bank() -> QuestionBank {
        let mut bank = QuestionBank::new();
        let wrong: Vec<String> = (0..12).map(|i| format!("wrong answer {}", i)).collect();
        let wrong: Vec<&str> = wrong.iter().map(String::as_str).collect();
        bank.insert("Pick the right one".to_string(), Question::new(&["right"], &wrong));
        bank
    }

    fn engine(bank: QuestionBank) -> EngineState {
        EngineState::start(
            QuestionStore::in_memory(bank),
            Config::default(),
            None,
            Mode::Arcade,
            StdRng::seed_from_u64(5),
        )
        .unwrap()
    }

    fn page(engine: &mut EngineState) -> PageLayout {
        let viewport = Viewport::new(80, 24);
        engine.layout(viewport, LayoutMetrics::cells(viewport), &CellMeasure)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        let now = Instant::now();

        for event in [
            key(KeyCode::Char('q')),
            key(KeyCode::Esc),
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ] {
            assert_eq!(handle_event(&mut engine, event, &page, now).unwrap(), Control::Quit);
        }
        assert_eq!(
            handle_event(&mut engine, key(KeyCode::Char('c')), &page, now).unwrap(),
            Control::Continue
        );
    }

    #[test]
    fn test_number_key_answers() {
        let mut bank = QuestionBank::new();
        bank.insert("2+2=?".to_string(), Question::new(&["4"], &["3", "5"]));
        let mut engine = engine(bank);
        let page = page(&mut engine);
        let index = engine.current().options.iter().position(|o| o == "4").unwrap();
        let digit = char::from_digit(index as u32 + 1, 10).unwrap();

        handle_event(&mut engine, key(KeyCode::Char(digit)), &page, Instant::now()).unwrap();
        assert_eq!(engine.feedback().verdict(), Some(Verdict::Correct));
        assert_eq!(engine.selected(), Some("4"));
    }

    #[test]
    fn test_number_key_past_options_is_ignored() {
        let mut bank = QuestionBank::new();
        bank.insert("2+2=?".to_string(), Question::new(&["4"], &["3"]));
        let mut engine = engine(bank);
        let page = page(&mut engine);

        handle_event(&mut engine, key(KeyCode::Char('9')), &page, Instant::now()).unwrap();
        assert!(engine.feedback().is_asking());
    }

    #[test]
    fn test_enter_dismisses_wrong_screen() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        let now = Instant::now();
        engine.select_answer("wrong answer 0", now);
        assert_eq!(engine.feedback().verdict(), Some(Verdict::Wrong));

        handle_event(&mut engine, key(KeyCode::Enter), &page, now).unwrap();
        assert!(engine.feedback().is_asking());
        assert_eq!(engine.current_stats().times_seen, 2);
    }

    #[test]
    fn test_click_on_answer_box() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        let first = &page.answers[0];
        let (column, row) = (first.bounds.x as u16 + 2, first.bounds.y as u16);
        let expected = first.answer.clone();

        handle_event(
            &mut engine,
            mouse(MouseEventKind::Down(MouseButton::Left), column, row),
            &page,
            Instant::now(),
        )
        .unwrap();
        assert_eq!(engine.selected(), Some(expected.as_str()));
    }

    #[test]
    fn test_click_anywhere_dismisses_feedback() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        let now = Instant::now();
        engine.select_answer("right", now);

        handle_event(
            &mut engine,
            mouse(MouseEventKind::Down(MouseButton::Left), 1, 1),
            &page,
            now,
        )
        .unwrap();
        assert!(engine.feedback().is_asking());
        assert_eq!(engine.current_stats().right, 1);
    }

    #[test]
    fn test_wheel_and_keys_scroll_within_bounds() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        assert!(page.content_height > 24);
        let now = Instant::now();

        handle_event(&mut engine, mouse(MouseEventKind::ScrollDown, 10, 10), &page, now).unwrap();
        assert_eq!(engine.scroll().offset(), -3);
        handle_event(&mut engine, mouse(MouseEventKind::ScrollUp, 10, 10), &page, now).unwrap();
        assert_eq!(engine.scroll().offset(), 0);

        handle_event(&mut engine, key(KeyCode::End), &page, now).unwrap();
        assert_eq!(
            engine.scroll().offset(),
            crate::scroll::min_offset(page.content_height, 24)
        );
        handle_event(&mut engine, key(KeyCode::Home), &page, now).unwrap();
        assert_eq!(engine.scroll().offset(), 0);
    }

    #[test]
    fn test_thumb_drag() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        let thumb = page.thumb_bounds().unwrap();
        let now = Instant::now();

        let column = thumb.x as u16;
        let row = thumb.y as u16;
        handle_event(&mut engine, mouse(MouseEventKind::Down(MouseButton::Left), column, row), &page, now)
            .unwrap();
        assert!(engine.scroll().is_dragging());

        handle_event(&mut engine, mouse(MouseEventKind::Drag(MouseButton::Left), column, 23), &page, now)
            .unwrap();
        assert_eq!(
            engine.scroll().offset(),
            crate::scroll::min_offset(page.content_height, 24)
        );

        handle_event(&mut engine, mouse(MouseEventKind::Up(MouseButton::Left), column, 23), &page, now)
            .unwrap();
        assert!(!engine.scroll().is_dragging());
    }

    #[test]
    fn test_thumb_column_dismisses_feedback_instead_of_dragging() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        let thumb = page.thumb_bounds().unwrap();
        let now = Instant::now();
        engine.select_answer("wrong answer 3", now);

        let press = mouse(
            MouseEventKind::Down(MouseButton::Left),
            thumb.x as u16,
            thumb.y as u16,
        );
        handle_event(&mut engine, press, &page, now).unwrap();
        assert!(!engine.scroll().is_dragging());
        assert!(engine.feedback().is_asking());
        assert_eq!(engine.current_stats().times_seen, 2);
    }

    #[test]
    fn test_thumb_under_footer_is_not_grabbed() {
        let mut engine = engine(long_bank());
        let first = page(&mut engine);
        engine.scroll_to_bottom(&first);
        let page = page(&mut engine);
        let thumb = page.thumb_bounds().unwrap();
        assert!(thumb.y + thumb.height as i32 > 22);

        let press = mouse(MouseEventKind::Down(MouseButton::Left), thumb.x as u16, 22);
        handle_event(&mut engine, press, &page, Instant::now()).unwrap();
        assert!(!engine.scroll().is_dragging());
        assert!(engine.feedback().is_asking());
    }

    #[test]
    fn test_font_and_mode_buttons() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        let now = Instant::now();

        // Q+ sits at 5% of the font row, three rows from the bottom.
        handle_event(&mut engine, mouse(MouseEventKind::Down(MouseButton::Left), 4, 20), &page, now)
            .unwrap();
        assert_eq!(engine.config().manual_question_font, Some(FontClass::Question.base_size()));

        // Practice sits at 5% of the mode row.
        handle_event(&mut engine, mouse(MouseEventKind::Down(MouseButton::Left), 5, 22), &page, now)
            .unwrap();
        assert_eq!(engine.mode(), Mode::Practice);
        assert!(engine.selected().is_none());
    }

    #[test]
    fn test_skip_key() {
        let mut engine = engine(long_bank());
        let page = page(&mut engine);
        handle_event(&mut engine, key(KeyCode::Char('s')), &page, Instant::now()).unwrap();
        let stats = engine.current_stats();
        assert_eq!((stats.right, stats.wrong, stats.times_seen), (0, 0, 2));
    }
}
