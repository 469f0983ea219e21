use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ruleviz_core::sheet::{SpanItem, SpanNode};
use ruleviz_core::style::InlineStyle;
use ruleviz_core::{
    AnalysisSheet, ClickOutcome, InlineStyles, NodeId, RangeId, Role, TextSpanId, Viewer,
};

use crate::load_sheet;

#[derive(Args, Debug)]
#[command(about)]
/// Browse a sheet in the terminal: arrows move between words, enter zooms out
pub struct ViewArgs {
    /// Analysis sheet JSON
    sheet: PathBuf,
}

pub fn run(args: ViewArgs) -> Result<()> {
    let sheet = load_sheet(&args.sheet)?;
    let mut terminal = ratatui::init();
    let result = SheetBrowser::new(sheet).run(&mut terminal);
    ratatui::restore();
    result
}

/// Keyboard stand-in for the pointer: the cursor word is the hovered span.
struct SheetBrowser {
    sheet: AnalysisSheet,
    viewer: Viewer,
    styles: InlineStyles,
    words: Vec<TextSpanId>,
    cursor: Option<usize>,
    last_click: Option<ClickOutcome>,
    exit: bool,
}

impl SheetBrowser {
    fn new(sheet: AnalysisSheet) -> Self {
        let words = sheet
            .sentences
            .iter()
            .flat_map(|sentence| {
                [Role::Source, Role::Target].into_iter().flat_map(move |role| {
                    let mut words = Vec::new();
                    collect_words(sentence.id, role, sentence.tree(role), &mut words);
                    words
                })
            })
            .collect();

        Self {
            viewer: Viewer::from_sheet(&sheet),
            sheet,
            styles: InlineStyles::default(),
            words,
            cursor: None,
            last_click: None,
            exit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.exit = true,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.step(1),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.step(-1),
            // only a hovered word can be clicked
            KeyCode::Enter | KeyCode::Char(' ') if self.cursor.is_some() => {
                self.last_click = Some(self.viewer.click(&mut self.styles));
            }
            KeyCode::Esc => {
                self.viewer.hover_out(&mut self.styles);
                self.cursor = None;
            }
            _ => {}
        }
    }

    /// Leaves the current word and enters its neighbor, wrapping around.
    fn step(&mut self, delta: isize) {
        if self.words.is_empty() {
            return;
        }
        let len = self.words.len() as isize;
        let next = match self.cursor {
            Some(cursor) => (cursor as isize + delta).rem_euclid(len) as usize,
            None if delta < 0 => self.words.len() - 1,
            None => 0,
        };
        if self.cursor.is_some() {
            self.viewer.hover_out(&mut self.styles);
        }
        self.cursor = Some(next);
        self.last_click = None;
        self.viewer.hover_in(&self.words[next], &mut self.styles);
    }

    fn draw(&self, frame: &mut Frame) {
        let [sheet_area, rules_area, help_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let sheet = Paragraph::new(self.sheet_lines())
            .block(Block::bordered().title("Analysis Sheet"))
            .wrap(Wrap { trim: false });
        frame.render_widget(sheet, sheet_area);

        let rules_text = if self.styles.tooltip.visible {
            markup_to_text(&self.styles.tooltip.markup)
        } else {
            String::new()
        };
        let title = match (self.viewer.current(), self.last_click) {
            (_, Some(ClickOutcome::NoParent)) => "Rules (no parent)".to_string(),
            (Some(node), _) if self.styles.tooltip.visible => format!("Rules for {node}"),
            _ => "Rules".to_string(),
        };
        let rules = Paragraph::new(rules_text)
            .block(Block::bordered().title(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(rules, rules_area);

        let help = Line::from("←/→ move  enter zoom out  esc leave  q quit")
            .style(Style::new().fg(Color::DarkGray));
        frame.render_widget(help, help_area);
    }

    fn sheet_lines(&self) -> Vec<Line<'static>> {
        let cursor_word = self.cursor.map(|cursor| &self.words[cursor]);
        let mut lines = Vec::new();
        for sentence in &self.sheet.sentences {
            lines.push(Line::from(Span::styled(
                format!("Sentence {}", sentence.id),
                Style::new().add_modifier(Modifier::BOLD),
            )));
            lines.push(self.tree_line(
                "  Source:    ",
                sentence.id,
                Role::Source,
                &sentence.source,
                cursor_word,
            ));
            if let Some(reference) = &sentence.reference {
                lines.push(Line::from(format!("  Reference: {}", reference.trim())));
            }
            lines.push(self.tree_line(
                "  Target:    ",
                sentence.id,
                Role::Target,
                &sentence.target,
                cursor_word,
            ));
            lines.push(Line::default());
        }
        lines
    }

    fn tree_line(
        &self,
        label: &'static str,
        group: u32,
        role: Role,
        tree: &SpanNode,
        cursor_word: Option<&TextSpanId>,
    ) -> Line<'static> {
        let mut spans = vec![Span::raw(label)];
        self.push_tree_spans(group, role, tree, Style::new(), cursor_word, &mut spans);
        Line::from(spans)
    }

    /// Words inside a highlighted range that are not themselves highlighted
    /// take the range's background.
    fn push_tree_spans(
        &self,
        group: u32,
        role: Role,
        tree: &SpanNode,
        inherited: Style,
        cursor_word: Option<&TextSpanId>,
        out: &mut Vec<Span<'static>>,
    ) {
        let node = NodeId::new(group, tree.node);
        let range_style = self.styles.range_style(&RangeId::new(node, role));
        let inherited = if range_style.is_empty() {
            inherited
        } else {
            terminal_style(&range_style)
        };

        for (position, item) in tree.items.iter().enumerate() {
            match item {
                SpanItem::Word(word) => {
                    let id = TextSpanId::new(node, position, role);
                    let text_style = self.styles.text_style(&id);
                    let mut style = if text_style.is_empty() {
                        inherited
                    } else {
                        terminal_style(&text_style)
                    };
                    if cursor_word == Some(&id) {
                        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
                    }
                    out.push(Span::styled(word.clone(), style));
                    out.push(Span::raw(" "));
                }
                SpanItem::Span(child) => {
                    self.push_tree_spans(group, role, child, inherited, cursor_word, out);
                }
            }
        }
    }
}

fn collect_words(group: u32, role: Role, tree: &SpanNode, out: &mut Vec<TextSpanId>) {
    let node = NodeId::new(group, tree.node);
    for (position, item) in tree.items.iter().enumerate() {
        match item {
            SpanItem::Word(_) => out.push(TextSpanId::new(node, position, role)),
            SpanItem::Span(child) => collect_words(group, role, child, out),
        }
    }
}

fn terminal_style(style: &InlineStyle) -> Style {
    let mut out = Style::new();
    if let Some(bg) = style.background_color.as_deref().and_then(css_color) {
        out = out.bg(bg);
    }
    if let Some(fg) = style.color.as_deref().and_then(css_color) {
        out = out.fg(fg);
    }
    out
}

/// `#rgb`, `#rrggbb` or a color name ratatui knows.
fn css_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 3 {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            return format!("#{expanded}").parse().ok();
        }
    }
    value.parse().ok()
}

/// Rule markup as plain text: breaks become newlines, tags are dropped and
/// the escapes the page generator emits are undone.
fn markup_to_text(markup: &str) -> String {
    let with_breaks = markup
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("<br>", "\n");

    let mut text = String::with_capacity(with_breaks.len());
    let mut in_tag = false;
    for c in with_breaks.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
