use crate::calculator::{Key, Outcome, Session, ERROR_MARKER, KEYPAD};
use crate::config::{Config, SeaConfig, ThemeConfig};
use crate::sea::{self, SeaScene, DOLPHIN_FONT_SIZE, DOLPHIN_GLYPH};
use crate::sound::Chime;
use gtk::cairo;
use gtk::gdk;
use gtk::prelude::*;
use gtk::{Application, Box as GtkBox, Button, DrawingArea, Entry, EventControllerKey, Grid, Window};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

const WINDOW_TITLE: &str = "Calculator with Dolphin Sea";

/// Widgets and state behind one calculator window.
struct CalculatorWindow {
    session: RefCell<Session>,
    chime: RefCell<Chime>,
    scene: Rc<RefCell<SeaScene>>,
    display: Entry,
    sea_area: DrawingArea,
    sea: SeaConfig,
}

impl CalculatorWindow {
    fn press(&self, key: Key) {
        if key == Key::Equals {
            self.chime.borrow_mut().play();
        }

        let outcome = self.session.borrow_mut().press(key);
        match outcome {
            Outcome::Edited { display } => self.display.set_text(&display),
            Outcome::Cleared => {
                self.display.set_text("");
                self.redraw_sea(0);
            }
            Outcome::Evaluated { display, value } => {
                tracing::info!(result = %display, "evaluated");
                self.display.set_text(&display);
                self.redraw_sea(sea::dolphin_count(value, self.sea.max_dolphins));
            }
            Outcome::Failed { reason } => {
                tracing::info!(%reason, "evaluation failed");
                self.display.set_text(ERROR_MARKER);
                self.redraw_sea(0);
            }
        }
    }

    fn redraw_sea(&self, dolphins: u32) {
        *self.scene.borrow_mut() = SeaScene::generate(
            &mut rand::thread_rng(),
            self.sea.width,
            self.sea.height,
            self.sea.fish_count,
            dolphins,
        );
        self.sea_area.queue_draw();
    }
}

pub fn build_ui(app: &Application, config: Config) {
    install_css(&config.theme);

    let window = Window::builder()
        .application(app)
        .title(WINDOW_TITLE)
        .resizable(true)
        .build();

    let main_box = GtkBox::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(0)
        .build();

    let calc_grid = Grid::builder()
        .row_spacing(6)
        .column_spacing(6)
        .row_homogeneous(true)
        .column_homogeneous(true)
        .hexpand(true)
        .vexpand(true)
        .build();
    calc_grid.add_css_class("calc-panel");

    let display = Entry::new();
    display.set_width_chars(14);
    display.set_editable(false);
    display.set_can_focus(false);
    display.set_alignment(1.0);
    display.add_css_class("calc-display");
    calc_grid.attach(&display, 0, 0, 4, 1);

    let sea_area = DrawingArea::builder()
        .content_width(config.sea.width)
        .content_height(config.sea.height)
        .hexpand(false)
        .build();
    sea_area.add_css_class("sea");

    let scene = Rc::new(RefCell::new(SeaScene::generate(
        &mut rand::thread_rng(),
        config.sea.width,
        config.sea.height,
        config.sea.fish_count,
        0,
    )));

    let scene_for_draw = scene.clone();
    sea_area.set_draw_func(move |_, cr, _, _| {
        if let Err(e) = paint_scene(cr, &scene_for_draw.borrow()) {
            tracing::warn!(error = %e, "failed to draw sea");
        }
    });

    let calc = Rc::new(CalculatorWindow {
        session: RefCell::new(Session::new()),
        chime: RefCell::new(Chime::new(&config.sound)),
        scene,
        display,
        sea_area: sea_area.clone(),
        sea: config.sea.clone(),
    });

    for (label, row, col, span) in KEYPAD {
        let Some(key) = Key::from_label(label) else {
            continue;
        };
        let button = Button::builder()
            .label(label)
            .hexpand(true)
            .vexpand(true)
            .can_focus(false)
            .build();
        button.add_css_class("calc-button");

        let calc = calc.clone();
        button.connect_clicked(move |_| calc.press(key));
        calc_grid.attach(&button, col, row, span, 1);
    }

    let key_controller = EventControllerKey::new();
    key_controller.set_propagation_phase(gtk::PropagationPhase::Capture);
    let calc_for_keys = calc.clone();
    key_controller.connect_key_pressed(move |_, keyval, _, _| {
        let key = match keyval {
            gdk::Key::Return | gdk::Key::KP_Enter => Some(Key::Equals),
            gdk::Key::Escape => Some(Key::Clear),
            other => other.to_unicode().and_then(Key::from_char),
        };
        match key {
            Some(key) => {
                calc_for_keys.press(key);
                gtk::glib::Propagation::Stop
            }
            None => gtk::glib::Propagation::Proceed,
        }
    });
    window.add_controller(key_controller);

    main_box.append(&calc_grid);
    main_box.append(&sea_area);
    window.set_child(Some(&main_box));
    window.present();
}

fn install_css(theme: &ThemeConfig) {
    let css = format!(
        r#"
        .calc-panel {{
            background-color: {panel};
            padding: 10px;
        }}

        .calc-display {{
            font-family: Arial, sans-serif;
            font-size: {display_size}px;
            background-color: {display_bg};
            color: {display_fg};
            border: 4px inset {panel};
            margin-bottom: 10px;
        }}

        .calc-button {{
            font-family: Arial, sans-serif;
            font-size: {font_size}px;
            font-weight: bold;
            background: {button};
            color: {button_fg};
            border: 3px outset {panel};
            border-radius: 0px;
        }}

        .calc-button:hover,
        .calc-button:active {{
            background: {button_hover};
        }}

        .sea {{
            background-color: {sea};
        }}
        "#,
        panel = theme.panel_color,
        display_bg = theme.display_background,
        display_fg = theme.display_text,
        display_size = theme.font_size + 2,
        font_size = theme.font_size,
        button = theme.button_color,
        button_hover = theme.button_hover_color,
        button_fg = theme.button_text,
        sea = theme.sea_color,
    );

    let Some(display) = gdk::Display::default() else {
        tracing::warn!("no default display, skipping stylesheet");
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_string(&css);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn paint_scene(cr: &cairo::Context, scene: &SeaScene) -> Result<(), cairo::Error> {
    // Glyphs near the edges stay inside the sea
    cr.rectangle(0.0, 0.0, f64::from(scene.width), f64::from(scene.height));
    cr.clip();

    for fish in &scene.fish {
        let (r, g, b) = fish.color.to_unit();
        cr.set_source_rgb(r, g, b);
        ellipse(cr, fish.body())?;
        cr.fill()?;

        let [first, rest @ ..] = fish.tail();
        cr.move_to(f64::from(first.0), f64::from(first.1));
        for (x, y) in rest {
            cr.line_to(f64::from(x), f64::from(y));
        }
        cr.close_path();
        cr.fill()?;

        cr.set_source_rgb(0.0, 0.0, 0.0);
        ellipse(cr, fish.eye())?;
        cr.fill()?;
    }

    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(DOLPHIN_FONT_SIZE);
    let extents = cr.text_extents(DOLPHIN_GLYPH)?;
    for dolphin in &scene.dolphins {
        let (r, g, b) = dolphin.color.to_unit();
        cr.set_source_rgb(r, g, b);
        // Glyphs are centered on the dolphin position
        cr.move_to(
            f64::from(dolphin.x) - extents.width() / 2.0 - extents.x_bearing(),
            f64::from(dolphin.y) - extents.height() / 2.0 - extents.y_bearing(),
        );
        cr.show_text(DOLPHIN_GLYPH)?;
    }
    Ok(())
}

fn ellipse(cr: &cairo::Context, (x0, y0, x1, y1): (i32, i32, i32, i32)) -> Result<(), cairo::Error> {
    let (x0, y0, x1, y1) = (f64::from(x0), f64::from(y0), f64::from(x1), f64::from(y1));
    cr.save()?;
    cr.translate((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    cr.scale((x1 - x0) / 2.0, (y1 - y0) / 2.0);
    cr.new_path();
    cr.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    cr.restore()?;
    Ok(())
}
