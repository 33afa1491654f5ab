// Main application layout
// Agent list on the left, chat in the middle, topics on the right

use agent_chat_gui::error::AppError;
use agent_chat_gui::state::{AppState, Command, RightPaneMode, Topic};
use eframe::egui;
use tracing::{debug, warn};

use crate::ui::components::*;

/// UI-only state that is not part of the view-state core
#[derive(Debug, Default)]
pub struct UiState {
    /// Text currently in the composer
    pub draft: String,
}

/// Render the three panes and apply the commands they emit
pub fn render_app_layout(ctx: &egui::Context, state: &mut AppState, ui_state: &mut UiState) {
    let layout = state.layout();
    let available = ctx.screen_rect().width();
    let mut commands = Vec::new();

    egui::SidePanel::left("agent_sidebar")
        .resizable(false)
        .exact_width(layout.left.resolve(available))
        .frame(egui::Frame::none().fill(egui::Color32::WHITE))
        .show(ctx, |ui| render_sidebar(ui, state, &mut commands));

    egui::SidePanel::right("topic_panel")
        .resizable(false)
        .exact_width(layout.right.resolve(available))
        .frame(egui::Frame::none().fill(egui::Color32::WHITE))
        .show(ctx, |ui| render_topic_panel(ui, state, layout.right_mode, &mut commands));

    let bubble_width = layout.middle.resolve(available) * 0.7;
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(SLATE_50))
        .show(ctx, |ui| render_chat(ui, state, ui_state, bubble_width, &mut commands));

    // Applied after rendering so the panes above borrow a consistent state
    for command in commands {
        apply_command(state, ui_state, command);
    }
}

fn apply_command(state: &mut AppState, ui_state: &mut UiState, command: Command) {
    let is_send = matches!(command, Command::SendMessage(_));
    match state.dispatch(command) {
        Ok(_) => {
            if is_send {
                ui_state.draft.clear();
            }
        }
        Err(AppError::EmptyMessage) => debug!("Ignoring blank message"),
        Err(e) => warn!(error = %e, "Command rejected"),
    }
}

/// Render the left sidebar with agents and their abilities
fn render_sidebar(ui: &mut egui::Ui, state: &AppState, commands: &mut Vec<Command>) {
    ui.add_space(24.0);
    ui.horizontal(|ui| {
        ui.add_space(24.0);
        ui.label(egui::RichText::new("AI Agents").size(18.0).strong().color(SLATE_800));
    });
    ui.add_space(16.0);

    egui::ScrollArea::vertical()
        .id_source("agent_list_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for agent in state.catalog.list_agents() {
                let palette = agent_palette(agent.color);
                let is_selected = state.selection.is_agent_selected(&agent.id);
                let is_expanded = state.selection.is_expanded(&agent.id);

                let mut frame = egui::Frame::none()
                    .rounding(egui::Rounding::same(8.0))
                    .inner_margin(egui::Margin::same(12.0))
                    .outer_margin(egui::Margin::symmetric(16.0, 2.0));
                if is_selected {
                    frame = frame.fill(palette.row_fill);
                }
                let name_color = if is_selected { palette.text } else { SLATE_800 };

                let row = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        avatar_badge(ui, &agent.name, palette.badge, 40.0);
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(&agent.name).strong().color(name_color));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let chevron = if is_expanded { "▼" } else { "▶" };
                            ui.label(egui::RichText::new(chevron).color(SLATE_500));
                        });
                    });
                });

                let row_id = ui.id().with(("agent_row", &agent.id));
                let row_rect = row.response.rect;
                if ui.interact(row_rect, row_id, egui::Sense::click()).clicked() {
                    commands.push(Command::ToggleAgent(agent.id.clone()));
                }

                if is_expanded {
                    for ability in &agent.abilities {
                        let selected = state.selection.is_ability_selected(ability);
                        let (fill, color) = if selected {
                            (palette.ability_fill, palette.text)
                        } else {
                            (egui::Color32::TRANSPARENT, SLATE_600)
                        };
                        ui.horizontal(|ui| {
                            ui.add_space(64.0);
                            let button = egui::Button::new(egui::RichText::new(ability).color(color))
                                .fill(fill)
                                .stroke(egui::Stroke::NONE)
                                .min_size(egui::vec2(ui.available_width() - 16.0, 28.0));
                            if ui.add(button).clicked() {
                                commands.push(Command::SelectAbility(ability.clone()));
                            }
                        });
                    }
                    ui.add_space(4.0);
                }
            }
        });
}

/// Render the chat header, transcript and composer
fn render_chat(
    ui: &mut egui::Ui,
    state: &AppState,
    ui_state: &mut UiState,
    bubble_width: f32,
    commands: &mut Vec<Command>,
) {
    egui::TopBottomPanel::top("chat_header")
        .exact_height(64.0)
        .frame(egui::Frame::none().fill(egui::Color32::WHITE).inner_margin(egui::Margin::symmetric(24.0, 0.0)))
        .show_inside(ui, |ui| {
            ui.horizontal_centered(|ui| match state.selected_agent() {
                Some(agent) => {
                    avatar_badge(ui, &agent.name, agent_palette(agent.color).badge, 32.0);
                    ui.add_space(8.0);
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&agent.name).strong().color(SLATE_800));
                        if let Some(ability) = state.selection.selected_ability() {
                            ui.label(egui::RichText::new(ability).small().color(SLATE_500));
                        }
                    });
                }
                None => {
                    ui.label(egui::RichText::new("Select an AI agent to start chatting").color(SLATE_500));
                }
            });
        });

    egui::TopBottomPanel::bottom("chat_composer")
        .exact_height(80.0)
        .frame(egui::Frame::none().fill(egui::Color32::WHITE).inner_margin(egui::Margin::same(16.0)))
        .show_inside(ui, |ui| {
            ui.horizontal_centered(|ui| {
                let input = ui.add(
                    egui::TextEdit::singleline(&mut ui_state.draft)
                        .hint_text("Type your message...")
                        .desired_width(ui.available_width() - 72.0),
                );
                let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let send = egui::Button::new(egui::RichText::new("Send").color(egui::Color32::WHITE))
                    .fill(BLUE_600)
                    .min_size(egui::vec2(56.0, 32.0));
                if ui.add(send).clicked() || submitted {
                    commands.push(Command::SendMessage(ui_state.draft.clone()));
                    input.request_focus();
                }
            });
        });

    egui::ScrollArea::vertical()
        .id_source("chat_scroll")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.add_space(24.0);
            for message in state.conversation.history() {
                ui.horizontal(|ui| {
                    ui.add_space(24.0);
                    ui.allocate_ui(egui::vec2(ui.available_width() - 24.0, 0.0), |ui| {
                        message_bubble(ui, &message, bubble_width);
                    });
                });
                ui.add_space(16.0);
            }
        });
}

/// Render the topic rail or the expanded thread list
fn render_topic_panel(
    ui: &mut egui::Ui,
    state: &AppState,
    mode: RightPaneMode,
    commands: &mut Vec<Command>,
) {
    ui.add_space(16.0);
    ui.horizontal(|ui| {
        ui.add_space(16.0);
        if matches!(mode, RightPaneMode::Expanded { .. }) {
            ui.label(egui::RichText::new("Topics").strong().color(SLATE_800));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_space(16.0);
            let arrow = match mode {
                RightPaneMode::Rail => "◀",
                RightPaneMode::Expanded { .. } => "▶",
            };
            if ui.button(arrow).clicked() {
                commands.push(Command::ToggleTopicPanel);
            }
        });
    });
    ui.add_space(16.0);
    ui.separator();

    match mode {
        RightPaneMode::Rail => {
            ui.spacing_mut().item_spacing.y = 0.0;
            for topic in Topic::ALL {
                let selected = state.selection.selected_topic() == Some(topic);
                if topic_rail_button(ui, topic, selected) {
                    commands.push(Command::SelectTopic(topic));
                }
            }
        }
        RightPaneMode::Expanded { topic } => {
            egui::ScrollArea::vertical()
                .id_source("thread_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let Some(topic) = topic else {
                        return;
                    };
                    egui::Frame::none()
                        .inner_margin(egui::Margin::same(16.0))
                        .show(ui, |ui| {
                            for thread in state.catalog.list_threads(topic) {
                                thread_card(ui, thread);
                                ui.add_space(24.0);
                            }
                        });
                });
        }
    }
}
