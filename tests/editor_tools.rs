use eframe_sketch::geometry::WarpError;
use eframe_sketch::renderer::RenderPrimitive;
use eframe_sketch::{
    CaptureError, DisplayList, EditorContext, EditorState, Effect, InputEvent, SketchConfig, Tool,
    TransitionError,
};
use egui::{Color32, pos2};

fn editor() -> EditorContext {
    let config = SketchConfig {
        jitter_seed: Some(11),
        ..Default::default()
    };
    EditorContext::new(config, DisplayList::new())
}

fn click(editor: &mut EditorContext, x: f32, y: f32) -> eframe_sketch::EditorResponse {
    let response = editor.handle_event(InputEvent::PointerDown(pos2(x, y)));
    editor.handle_event(InputEvent::PointerUp(pos2(x, y)));
    response
}

#[test]
fn test_text_placement_flow() {
    let mut editor = editor();
    editor.set_tool(Tool::Text);
    editor.set_color(Color32::BLUE);

    let response = click(&mut editor, 40.0, 60.0);
    let at = pos2(40.0, 60.0);
    assert_eq!(response.effects, vec![Effect::RequestText { at }]);

    editor.submit_text(Some("hello".to_string())).unwrap();
    let texts = editor.document().texts();
    assert_eq!(texts.len(), 1);
    assert_eq!(texts[0].text, "hello");
    assert_eq!(texts[0].color, Color32::BLUE);
    assert_eq!(texts[0].font_size, 12.0);
    assert!(editor.state().is_idle());
}

#[test]
fn test_blank_text_is_discarded() {
    let mut editor = editor();
    editor.set_tool(Tool::Text);
    click(&mut editor, 10.0, 10.0);
    editor.submit_text(Some("   ".to_string())).unwrap();
    click(&mut editor, 10.0, 10.0);
    editor.submit_text(None).unwrap();

    assert!(editor.document().texts().is_empty());
    assert!(editor.surface().is_empty());
    assert_eq!(
        editor.submit_text(Some("late".to_string())),
        Err(TransitionError::InvalidStateTransition {
            from: "Idle",
            to: "Idle"
        })
    );
}

#[test]
fn test_text_is_not_transformed_but_redrawn() {
    let mut editor = editor();
    editor.set_tool(Tool::Text);
    click(&mut editor, 100.0, 100.0);
    editor.submit_text(Some("label".to_string())).unwrap();

    editor.rotate();
    assert_eq!(editor.document().texts()[0].pos, pos2(100.0, 100.0));
    assert!(
        editor
            .surface()
            .primitives()
            .any(|p| matches!(p, RenderPrimitive::Text { text, .. } if text == "label"))
    );

    editor.clear();
    assert!(editor.document().texts().is_empty());
}

#[test]
fn test_select_and_move_text() {
    let mut editor = editor();
    editor.set_tool(Tool::Text);
    click(&mut editor, 100.0, 100.0);
    editor.submit_text(Some("move me".to_string())).unwrap();

    editor.set_tool(Tool::SelectText);
    editor.handle_event(InputEvent::PointerDown(pos2(110.0, 105.0)));
    assert!(matches!(editor.state(), EditorState::DraggingText { .. }));
    editor.handle_event(InputEvent::PointerMove(pos2(130.0, 115.0)));
    editor.handle_event(InputEvent::PointerUp(pos2(140.0, 125.0)));

    assert_eq!(editor.document().texts()[0].pos, pos2(130.0, 120.0));
    assert_eq!(editor.surface().len(), 1);
}

#[test]
fn test_select_misses_far_text() {
    let mut editor = editor();
    editor.set_tool(Tool::Text);
    click(&mut editor, 100.0, 100.0);
    editor.submit_text(Some("far".to_string())).unwrap();

    editor.set_tool(Tool::SelectText);
    editor.handle_event(InputEvent::PointerDown(pos2(130.0, 100.0)));
    assert!(editor.state().is_idle());
}

#[test]
fn test_eyedropper_sets_color_and_returns_to_draw() {
    let mut editor = editor();
    editor.set_tool(Tool::Eyedrop);
    let response = click(&mut editor, 5.0, 5.0);
    assert_eq!(response.effects, vec![Effect::SampleColor { at: pos2(5.0, 5.0) }]);

    let sampled = Color32::from_rgb(12, 34, 56);
    editor.apply_sampled_color(Ok(sampled)).unwrap();
    assert_eq!(editor.settings().color, sampled);
    assert_eq!(editor.settings().tool, Tool::Draw);
}

#[test]
fn test_eyedropper_failure_keeps_color() {
    let mut editor = editor();
    let before = editor.settings().color;
    editor.set_tool(Tool::Eyedrop);
    click(&mut editor, 5.0, 5.0);

    let response = editor
        .apply_sampled_color(Err(CaptureError::Backend("no display".to_string())))
        .unwrap();
    assert!(response.status_message().is_some());
    assert_eq!(editor.settings().color, before);
    assert_eq!(editor.settings().tool, Tool::Draw);
}

#[test]
fn test_perspective_collects_four_points() {
    let mut editor = editor();
    editor.set_tool(Tool::Perspective);
    for (x, y) in [(10.0, 10.0), (90.0, 20.0), (15.0, 80.0)] {
        click(&mut editor, x, y);
    }
    assert_eq!(editor.surface().len(), 3);
    assert!(editor.surface().primitives().all(|p| matches!(
        p,
        RenderPrimitive::Marker { radius, color, .. } if *radius == 4.0 && *color == Color32::RED
    )));

    let response = click(&mut editor, 95.0, 85.0);
    assert!(editor.surface().is_empty());
    assert!(editor.state().is_idle());
    let warp = response.effects.iter().find_map(|e| match e {
        Effect::Warp(t) => Some(*t),
        _ => None,
    });
    let warp = warp.expect("warp requested");
    let mapped = warp.apply(pos2(95.0, 85.0));
    assert!((mapped - pos2(800.0, 600.0)).length() < 0.05);
}

#[test]
fn test_degenerate_perspective_is_reported() {
    let mut editor = editor();
    editor.set_tool(Tool::Perspective);
    let responses: Vec<_> = [0.0, 10.0, 20.0, 30.0]
        .into_iter()
        .map(|x| click(&mut editor, x, 0.0))
        .collect();
    let response = &responses[3];
    assert!(!response.effects.iter().any(|e| matches!(e, Effect::Warp(_))));
    assert_eq!(response.status_message(), Some(WarpError::Degenerate.to_string().as_str()));
    assert!(editor.state().is_idle());
}

#[test]
fn test_warp_failure_is_reported() {
    let mut editor = editor();
    let response = editor.report_warp_result(Err(WarpError::Backend("boom".to_string())));
    assert!(response.status_message().is_some_and(|m| m.contains("boom")));
}
