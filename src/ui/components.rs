// Reusable UI components
// Avatars, chat bubbles, topic rail buttons and thread cards

use agent_chat_gui::state::{AgentColor, Message, Sender, Thread, Topic};
use eframe::egui;
use std::f32::consts::FRAC_PI_2;

pub const SLATE_50: egui::Color32 = egui::Color32::from_rgb(248, 250, 252);
pub const SLATE_100: egui::Color32 = egui::Color32::from_rgb(241, 245, 249);
pub const SLATE_200: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
pub const SLATE_500: egui::Color32 = egui::Color32::from_rgb(100, 116, 139);
pub const SLATE_600: egui::Color32 = egui::Color32::from_rgb(71, 85, 105);
pub const SLATE_800: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);
pub const BLUE_600: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);

/// Tints for one agent color tag
#[derive(Debug, Clone, Copy)]
pub struct AgentPalette {
    /// Selected row background
    pub row_fill: egui::Color32,
    /// Selected ability background
    pub ability_fill: egui::Color32,
    /// Selected text
    pub text: egui::Color32,
    /// Avatar badge
    pub badge: egui::Color32,
}

/// Palette for an agent color tag (Tailwind 50/100/700/500 tones)
pub fn agent_palette(color: AgentColor) -> AgentPalette {
    let rgb = |r, g, b| egui::Color32::from_rgb(r, g, b);
    match color {
        AgentColor::Blue => AgentPalette {
            row_fill: rgb(239, 246, 255),
            ability_fill: rgb(219, 234, 254),
            text: rgb(29, 78, 216),
            badge: rgb(59, 130, 246),
        },
        AgentColor::Purple => AgentPalette {
            row_fill: rgb(250, 245, 255),
            ability_fill: rgb(243, 232, 255),
            text: rgb(126, 34, 206),
            badge: rgb(168, 85, 247),
        },
        AgentColor::Green => AgentPalette {
            row_fill: rgb(240, 253, 244),
            ability_fill: rgb(220, 252, 231),
            text: rgb(21, 128, 61),
            badge: rgb(34, 197, 94),
        },
        AgentColor::Orange => AgentPalette {
            row_fill: rgb(255, 247, 237),
            ability_fill: rgb(255, 237, 213),
            text: rgb(194, 65, 12),
            badge: rgb(249, 115, 22),
        },
        AgentColor::Pink => AgentPalette {
            row_fill: rgb(253, 242, 248),
            ability_fill: rgb(252, 231, 243),
            text: rgb(190, 24, 93),
            badge: rgb(236, 72, 153),
        },
    }
}

/// Round badge with the first letter of a name
/// Stands in for the avatar image, which is never fetched
pub fn avatar_badge(ui: &mut egui::Ui, name: &str, color: egui::Color32, diameter: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(diameter, diameter), egui::Sense::hover());
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    let painter = ui.painter();
    painter.circle_filled(rect.center(), diameter / 2.0, color);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(diameter * 0.45),
        egui::Color32::WHITE,
    );
    response
}

/// Render one chat message, right-aligned for the user and left-aligned for the bot
pub fn message_bubble(ui: &mut egui::Ui, message: &Message, max_width: f32) {
    let (layout, fill, text_color, stroke) = match message.sender {
        Sender::User => (
            egui::Layout::right_to_left(egui::Align::TOP),
            BLUE_600,
            egui::Color32::WHITE,
            egui::Stroke::NONE,
        ),
        Sender::Bot => (
            egui::Layout::left_to_right(egui::Align::TOP),
            egui::Color32::WHITE,
            SLATE_800,
            egui::Stroke::new(1.0, SLATE_200),
        ),
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::none()
            .fill(fill)
            .stroke(stroke)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::symmetric(16.0, 8.0))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(egui::RichText::new(&message.text).color(text_color));
            })
            .response
            .on_hover_text(message.timestamp.format("%H:%M:%S").to_string())
    });
}

/// Render a topic label rotated a quarter turn, filling the rail width
/// Returns true when clicked
pub fn topic_rail_button(ui: &mut egui::Ui, topic: Topic, selected: bool) -> bool {
    let size = egui::vec2(ui.available_width(), 96.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    let fill = if selected {
        SLATE_100
    } else if response.hovered() {
        SLATE_50
    } else {
        egui::Color32::TRANSPARENT
    };
    let text_color = if response.hovered() { BLUE_600 } else { SLATE_600 };

    let painter = ui.painter();
    painter.rect_filled(rect, egui::Rounding::ZERO, fill);

    let galley = painter.layout_no_wrap(
        topic.as_str().to_string(),
        egui::FontId::proportional(14.0),
        text_color,
    );
    let text_size = galley.size();
    // Rotation pivots on the galley's top-left corner
    let pos = egui::pos2(
        rect.center().x - text_size.y / 2.0,
        rect.center().y + text_size.x / 2.0,
    );
    let mut shape = egui::epaint::TextShape::new(pos, galley, text_color);
    shape.angle = -FRAC_PI_2;
    painter.add(shape);

    response.clicked()
}

/// Render a forum thread card
pub fn thread_card(ui: &mut egui::Ui, thread: &Thread) {
    egui::Frame::none()
        .fill(egui::Color32::WHITE)
        .stroke(egui::Stroke::new(1.0, SLATE_200))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(16.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                avatar_badge(ui, &thread.author.name, SLATE_500, 40.0);
                ui.add_space(4.0);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&thread.author.name).strong().color(SLATE_800));
                    ui.label(egui::RichText::new(&thread.author.role).small().color(SLATE_500));
                });
            });

            ui.add_space(12.0);
            ui.label(egui::RichText::new(&thread.title).size(18.0).color(SLATE_800));
            ui.add_space(8.0);
            ui.label(egui::RichText::new(&thread.content).color(SLATE_600));
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("👍 {}", thread.likes)).color(SLATE_500));
                ui.add_space(12.0);
                ui.label(egui::RichText::new(format!("💬 {}", thread.replies)).color(SLATE_500));
                ui.add_space(12.0);
                ui.label(egui::RichText::new("Share").color(SLATE_500));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&thread.timestamp).small().color(SLATE_500));
                });
            });
        });
}
