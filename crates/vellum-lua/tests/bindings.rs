//! End-to-end binding tests: Lua scripts driving the full registered
//! surface, plus native-side event injection through the wrappers.

use std::rc::Rc;

use mlua::AnyUserData;
use vellum::element::TextBuilder;
use vellum::{Color, Element, Vec2};
use vellum_lua::bindings::builders::{LuaButton, LuaRectangle, LuaText};
use vellum_lua::bindings::element::LuaElement;
use vellum_lua::bindings::window::LuaWindow;
use vellum_lua::diag::{self, MemorySink};
use vellum_lua::handle::Handle;
use vellum_lua::{LuaState, create_bound_state};

fn bound() -> LuaState {
    create_bound_state().expect("bindings must assemble")
}

#[test]
fn vector_operators_and_fields() {
    let state = bound();
    state
        .exec(
            r#"
            local a = Vec2.new(1, 2)
            local b = Vec2.new(3, 4)
            sum_x = (a + b).x
            diff_y = (b - a).y
            scaled = (a * 2).y
            mixed = (a * b).x
            halved = (b / 2).x
            equal = a == Vec2.new(1, 2)
            not_equal = a == b
            shown = tostring(a)
            dist = Vec2.new(0, 0):distance(Vec2.new(3, 4))
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<f64>("sum_x").unwrap(), 4.0);
    assert_eq!(state.get::<f64>("diff_y").unwrap(), 2.0);
    assert_eq!(state.get::<f64>("scaled").unwrap(), 4.0);
    assert_eq!(state.get::<f64>("mixed").unwrap(), 3.0);
    assert_eq!(state.get::<f64>("halved").unwrap(), 1.5);
    assert!(state.get::<bool>("equal").unwrap());
    assert!(!state.get::<bool>("not_equal").unwrap());
    assert_eq!(state.get::<String>("shown").unwrap(), "Vec2(1, 2)");
    assert_eq!(state.get::<f64>("dist").unwrap(), 5.0);
}

#[test]
fn scalar_fields_round_trip() {
    let state = bound();
    state
        .exec(
            r#"
            v = Vec2.new(0, 0)
            v.x = 5.5
            v.y = -1
            x = v.x
            y = v.y

            c = Color.new(0, 0, 0)
            c.r = 1.0
            r = c.r

            box = Rect.new(0, 0, 10, 10)
            box.w = 32
            w = box.w
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<f64>("x").unwrap(), 5.5);
    assert_eq!(state.get::<f64>("y").unwrap(), -1.0);
    assert_eq!(state.get::<f32>("r").unwrap(), 1.0);
    assert_eq!(state.get::<f64>("w").unwrap(), 32.0);
}

#[test]
fn color_constructors_and_operators() {
    let state = bound();
    state
        .exec(
            r#"
            red = Color.fromHex(0xff0000ff)
            hex = red:asHex()
            mixed_r = red:mix(Color.new(0, 0, 1), 0.5).r
            same = Color.new(1, 0, 0) == red
            opaque = Color.new(1, 1, 1, 0.5):stripAlpha().a
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<u32>("hex").unwrap(), 0xff0000ff);
    assert_eq!(state.get::<f32>("mixed_r").unwrap(), 0.5);
    assert!(state.get::<bool>("same").unwrap());
    assert_eq!(state.get::<f32>("opaque").unwrap(), 1.0);
}

#[test]
fn size_specs_calculate() {
    let state = bound();
    state
        .exec(
            r#"
            abs = Size.absolute(40, 20):calculate(Vec2.new(100, 100))
            pct = Size.percent(50, 25):calculate(Vec2.new(200, 80))
            mix = Size.mixed(SizeUnit.ABSOLUTE, SizeUnit.PERCENT, 30, 50):calculate(Vec2.new(100, 100))
            abs_w, pct_w, pct_h, mix_w, mix_h = abs.x, pct.x, pct.y, mix.x, mix.y
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<f64>("abs_w").unwrap(), 40.0);
    assert_eq!(state.get::<f64>("pct_w").unwrap(), 100.0);
    assert_eq!(state.get::<f64>("pct_h").unwrap(), 20.0);
    assert_eq!(state.get::<f64>("mix_w").unwrap(), 30.0);
    assert_eq!(state.get::<f64>("mix_h").unwrap(), 50.0);
}

#[test]
fn enum_namespaces_are_installed() {
    let state = bound();
    state
        .exec(
            r#"
            left = MouseButton.LEFT
            vertical = ScrollAxis.VERTICAL
            ctrl = KeyboardModifier.CTRL
            auto = PositionMode.AUTO
            center = PositionFlag.CENTER
            toplevel = WindowType.TOPLEVEL
            cover = ImageFit.COVER
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<u32>("left").unwrap(), 1);
    assert_eq!(state.get::<u32>("vertical").unwrap(), 1);
    assert_eq!(state.get::<u32>("ctrl").unwrap(), 4);
    assert_eq!(state.get::<u32>("auto").unwrap(), 0);
    assert_eq!(state.get::<u32>("center").unwrap(), 3);
    assert_eq!(state.get::<u32>("toplevel").unwrap(), 0);
    assert_eq!(state.get::<u32>("cover").unwrap(), 1);
}

#[test]
fn element_tree_from_lua() {
    let state = bound();
    state
        .exec(
            r#"
            column = ColumnLayout.begin():gap(4):commence()
            column:addChild(Text.begin():text("one"):commence())
            column:addChild(Button.begin():label("two"):commence())
            count = column:childCount()
            kind = column:type()
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<usize>("count").unwrap(), 2);
    assert_eq!(state.get::<String>("kind").unwrap(), "ColumnLayout");
}

#[test]
fn add_child_rejects_foreign_values_and_leaves_children_unchanged() {
    let state = bound();
    state
        .exec(
            r#"
            column = ColumnLayout.begin():commence()
            column:addChild(Text.begin():commence())
            ok, err = pcall(function() column:addChild(42) end)
            ok2, err2 = pcall(function() column:addChild({}) end)
            count = column:childCount()
            "#,
        )
        .unwrap();
    assert!(!state.get::<bool>("ok").unwrap());
    let err = state.get::<String>("err").unwrap();
    assert!(
        err.contains("addChild: argument is not a valid element type"),
        "unexpected error: {err}"
    );
    assert!(!state.get::<bool>("ok2").unwrap());
    // the failed calls must not have touched the children
    assert_eq!(state.get::<usize>("count").unwrap(), 1);
}

#[test]
fn rebuild_edits_the_same_element() {
    let state = bound();
    state
        .exec(
            r#"
            label = Text.begin():text("before"):commence()
            label:rebuild():text("after"):commence()
            text = label:text()
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<String>("text").unwrap(), "after");
}

#[test]
fn static_color_survives_script_gc() {
    let state = bound();
    state
        .exec("rect = Rectangle.begin():color(Color.new(1, 0, 0)):commence()")
        .unwrap();
    state.exec("collectgarbage('collect')").unwrap();

    let ud: AnyUserData = state.get("rect").unwrap();
    let rect = ud.borrow::<LuaRectangle>().unwrap().get().unwrap();
    for _ in 0..3 {
        assert_eq!(rect.current_color(), Color::rgb(1.0, 0.0, 0.0));
    }
}

#[test]
fn dynamic_color_reevaluates_per_read() {
    let state = bound();
    state
        .exec(
            r#"
            level = 0.25
            rect = Rectangle.begin():color(function()
                return Color.new(level, 0, 0)
            end):commence()
            "#,
        )
        .unwrap();
    let ud: AnyUserData = state.get("rect").unwrap();
    let rect = ud.borrow::<LuaRectangle>().unwrap().get().unwrap();
    assert_eq!(rect.current_color().r, 0.25);

    state.exec("level = 0.75").unwrap();
    assert_eq!(rect.current_color().r, 0.75);
}

#[test]
fn failing_color_function_falls_back_to_black_with_diagnostics() {
    let state = bound();
    state
        .exec("rect = Rectangle.begin():color(function() error('no theme') end):commence()")
        .unwrap();
    let ud: AnyUserData = state.get("rect").unwrap();
    let rect = ud.borrow::<LuaRectangle>().unwrap().get().unwrap();

    let sink = MemorySink::new();
    diag::with_sink(sink.clone(), || {
        assert_eq!(rect.current_color(), Color::BLACK);
        assert_eq!(rect.current_color(), Color::BLACK);
    });
    assert_eq!(sink.count_for("Rectangle color"), 2);
    assert!(sink.records()[0].1.contains("no theme"));
}

#[test]
fn unset_border_color_is_nil_not_black() {
    let state = bound();
    state
        .exec(
            r#"
            plain = Rectangle.begin():commence()
            bordered = Rectangle.begin():borderColor(Color.new(1, 1, 1)):commence()
            plain_border = plain:currentBorderColor()
            bordered_r = bordered:currentBorderColor().r
            is_nil = plain_border == nil
            "#,
        )
        .unwrap();
    assert!(state.get::<bool>("is_nil").unwrap());
    assert_eq!(state.get::<f32>("bordered_r").unwrap(), 1.0);
}

#[test]
fn button_click_callback_runs_and_failures_do_not_latch() {
    let state = bound();
    state
        .exec(
            r#"
            clicks = 0
            button = Button.begin():label("go"):onMainClick(function(el)
                clicks = clicks + 1
                if clicks == 1 then error("first click explodes") end
                last_label = el:label()
            end):commence()
            "#,
        )
        .unwrap();
    let ud: AnyUserData = state.get("button").unwrap();
    let button = ud.borrow::<LuaButton>().unwrap().get().unwrap();

    let sink = MemorySink::new();
    diag::with_sink(sink.clone(), || {
        button.press_main();
        button.press_main();
        button.press_main();
    });
    // one failure, one diagnostic; later presses keep working
    assert_eq!(sink.count_for("Button onMainClick"), 1);
    assert_eq!(state.get::<i64>("clicks").unwrap(), 3);
    assert_eq!(state.get::<String>("last_label").unwrap(), "go");
}

#[test]
fn textbox_edit_callback_receives_text() {
    let state = bound();
    state
        .exec(
            r#"
            box = Textbox.begin():defaultText("seed"):onTextEdited(function(el, text)
                edited = text
                current = el:currentText()
            end):commence()
            "#,
        )
        .unwrap();
    let ud: AnyUserData = state.get("box").unwrap();
    let textbox = ud
        .borrow::<vellum_lua::bindings::builders::LuaTextbox>()
        .unwrap()
        .get()
        .unwrap();
    textbox.set_text_from_user("typed");
    assert_eq!(state.get::<String>("edited").unwrap(), "typed");
    assert_eq!(state.get::<String>("current").unwrap(), "typed");
}

#[test]
fn window_surface_and_events() {
    let state = bound();
    state
        .exec(
            r#"
            backend = Backend.create()
            win = Window.begin(backend)
                :type(WindowType.TOPLEVEL)
                :appTitle("demo")
                :preferredSize(Vec2.new(320, 200))
                :commence()
            win:open()
            is_open = win:isOpen()
            width = win:pixelSize().x
            win:onResized(function(size) resized_to = size.y end)
            win:onCloseRequest(function() close_requested = true end)
            win:onKeyboardKey(function(ev)
                key_down = ev.down
                had_ctrl = ev:hasModifier(KeyboardModifier.CTRL)
            end)
            win:rootElement():addChild(Text.begin():text("root child"):commence())
            root_children = win:rootElement():childCount()
            "#,
        )
        .unwrap();
    assert!(state.get::<bool>("is_open").unwrap());
    assert_eq!(state.get::<f64>("width").unwrap(), 320.0);
    assert_eq!(state.get::<usize>("root_children").unwrap(), 1);

    let ud: AnyUserData = state.get("win").unwrap();
    let window = ud.borrow::<LuaWindow>().unwrap().0.resolve().unwrap();
    window.emit_resized(Vec2::new(640.0, 480.0));
    window.emit_close_request();
    window.emit_keyboard_key(vellum::KeyEvent {
        keysym: 0xff0d,
        down: true,
        mods: vellum::Modifiers::CTRL,
        ..Default::default()
    });

    assert_eq!(state.get::<f64>("resized_to").unwrap(), 480.0);
    assert!(state.get::<bool>("close_requested").unwrap());
    assert!(state.get::<bool>("key_down").unwrap());
    assert!(state.get::<bool>("had_ctrl").unwrap());
}

#[test]
fn timer_callback_drives_lua_and_failures_are_contained() {
    let state = bound();
    let sink = MemorySink::new();
    diag::with_sink(sink.clone(), || {
        state
            .exec(
                r#"
                fired = 0
                local backend = Backend.create()
                backend:addTimer(5, function(t) fired = fired + 1 end)
                backend:addTimer(5, function(t) error("timer goes boom") end)
                backend:enterLoop()
                "#,
            )
            .unwrap();
    });
    assert_eq!(state.get::<i64>("fired").unwrap(), 1);
    assert_eq!(sink.count_for("Timer callback"), 1);
    assert!(sink.records().iter().any(|(_, msg)| msg.contains("timer goes boom")));
}

#[test]
fn timer_handle_surface_from_lua() {
    let state = bound();
    state
        .exec(
            r#"
            local backend = Backend.create()
            timer = backend:addTimer(60000, function() end)
            left_before = timer:leftMs()
            timer:cancel()
            was_cancelled = timer:cancelled()
            backend:enterLoop() -- cancelled timer must not keep the loop alive
            "#,
        )
        .unwrap();
    assert!(state.get::<f64>("left_before").unwrap() > 0.0);
    assert!(state.get::<bool>("was_cancelled").unwrap());
}

#[test]
fn idle_callbacks_run_in_order() {
    let state = bound();
    state
        .exec(
            r#"
            order = ""
            local backend = Backend.create()
            backend:addIdle(function() order = order .. "a" end)
            backend:addIdle(function() order = order .. "b" end)
            backend:enterLoop()
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<String>("order").unwrap(), "ab");
}

#[test]
fn expired_weak_handle_presents_as_nil() {
    let state = bound();
    let element = TextBuilder::new().text("transient").commence();
    let dyn_element = element.clone() as Rc<dyn Element>;
    state
        .set("ghost", LuaElement(Handle::Weak(Rc::downgrade(&dyn_element))))
        .unwrap();

    // still alive: methods see the element
    state.exec("live_kind = ghost:type()").unwrap();
    assert_eq!(state.get::<String>("live_kind").unwrap(), "Text");

    drop(dyn_element);
    drop(element);

    // expired: every accessor yields nil, nothing raises
    state
        .exec(
            r#"
            dead_kind = ghost:type()
            dead_size = ghost:size()
            ghost:setTooltip("ignored")
            is_nil = (dead_kind == nil) and (dead_size == nil)
            "#,
        )
        .unwrap();
    assert!(state.get::<bool>("is_nil").unwrap());
}

#[test]
fn palette_is_reachable_from_lua() {
    let state = bound();
    state
        .exec(
            r#"
            local palette = Palette.current()
            font_size = palette.fontSize
            accent_hex = palette.accent:asHex()
            theme = palette.iconTheme
            "#,
        )
        .unwrap();
    assert!(state.get::<f32>("font_size").unwrap() > 0.0);
    assert!(state.get::<u32>("accent_hex").unwrap() > 0);
    assert!(!state.get::<String>("theme").unwrap().is_empty());
}

#[test]
fn outputs_and_icons_are_reachable_from_lua() {
    let state = bound();
    state
        .exec(
            r#"
            local backend = Backend.create()
            local outputs = backend:getOutputs()
            output_name = outputs[1].name
            output_fps = outputs[1].fps
            local icons = backend:systemIcons()
            icon_exists = icons:lookupIcon("surely-not-a-real-icon-name").exists
            "#,
        )
        .unwrap();
    assert_eq!(state.get::<String>("output_name").unwrap(), "HEADLESS-1");
    assert_eq!(state.get::<f32>("output_fps").unwrap(), 60.0);
    assert!(!state.get::<bool>("icon_exists").unwrap());
}

#[test]
fn builder_cannot_be_used_after_commence() {
    let state = bound();
    state
        .exec(
            r#"
            local builder = Text.begin():text("once")
            builder:commence()
            ok, err = pcall(function() builder:text("twice") end)
            "#,
        )
        .unwrap();
    assert!(!state.get::<bool>("ok").unwrap());
    assert!(state.get::<String>("err").unwrap().contains("already commenced"));
}

#[test]
fn scalar_text_survives_multiple_reads() {
    let state = bound();
    state
        .exec("label = Text.begin():text('stable'):commence()")
        .unwrap();
    let ud: AnyUserData = state.get("label").unwrap();
    let text = ud.borrow::<LuaText>().unwrap().get().unwrap();
    for _ in 0..5 {
        assert_eq!(text.text(), "stable");
    }
}
