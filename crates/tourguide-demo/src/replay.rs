//! Drive a [`TourController`] through a script and report every step.
//!
//! Each applied token yields one [`Record`]; [`Replay::run`] writes them as
//! JSON lines. Controller refusals are part of the report (with the
//! facade's recovery hint), never a reason to stop the replay.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use tourguide::widgets::ButtonView;
use tourguide::{
    Error, HostDom, Placement, Rect, Size, StaticHost, TourController, TourState, Transition,
};

use crate::error::Result;
use crate::script::ScriptToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrowView {
    pub edge: &'static str,
    pub x: i32,
    pub y: i32,
}

/// What a presenter would draw for the active step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub index: usize,
    pub label: String,
    pub title: String,
    pub content: String,
    pub markup: bool,
    pub anchored: bool,
    pub closable: bool,
    pub buttons: Vec<ButtonView>,
    pub modal: Rect,
    pub placement: Option<Placement>,
    pub flipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow: Option<ArrowView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotspot: Option<(i32, i32)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mask: Vec<Rect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery: Option<String>,
    pub message: String,
}

impl From<Error> for ErrorView {
    fn from(err: Error) -> Self {
        Self {
            kind: err.error_type(),
            recovery: Some(err.recovery().to_string()),
            message: err.to_string(),
        }
    }
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub seq: usize,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<StepView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorView>,
}

/// Totals for a finished replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub actions: usize,
    pub refused: usize,
    pub final_state: &'static str,
}

fn transition_label(t: Transition) -> String {
    match t {
        Transition::Started { index } => format!("started:{index}"),
        Transition::Moved { from, to } => format!("moved:{from}->{to}"),
        Transition::Stayed => "stayed".to_string(),
        Transition::Completed => "completed".to_string(),
        Transition::Closed(reason) => format!("closed:{}", reason.as_str()),
    }
}

pub struct Replay {
    tour: TourController<StaticHost>,
    modal: Size,
    hidden: BTreeMap<String, Rect>,
    seq: usize,
}

impl Replay {
    /// `modal` is the size the presenter would measure for its modal box.
    pub fn new(tour: TourController<StaticHost>, modal: Size) -> Self {
        Self {
            tour,
            modal,
            hidden: BTreeMap::new(),
            seq: 0,
        }
    }

    pub fn tour(&self) -> &TourController<StaticHost> {
        &self.tour
    }

    /// Apply one token and describe the result.
    pub fn apply(&mut self, token: &ScriptToken) -> Record {
        self.seq += 1;
        let outcome = match token {
            ScriptToken::Start => self.tour.start().map(Some),
            ScriptToken::Nav(action) => self.tour.dispatch(*action).map(Some),
            ScriptToken::GoTo(index) => self.tour.go_to(*index).map(Some),
            ScriptToken::ForceClose => self.tour.force_close().map(Some),
            ScriptToken::Reset => {
                self.tour.reset();
                Ok(None)
            }
            ScriptToken::Hide(selector) => return self.page_edit(token, selector, false),
            ScriptToken::Show(selector) => return self.page_edit(token, selector, true),
        };

        let (transition, error) = match outcome {
            Ok(t) => (t.map(transition_label), None),
            Err(err) => {
                tracing::debug!(message = "demo.refused", action = %token, error = %err);
                (None, Some(ErrorView::from(Error::from(err))))
            }
        };
        self.record(token, transition, error)
    }

    /// Apply every token, writing one JSON line per record.
    pub fn run<W: Write>(&mut self, tokens: &[ScriptToken], out: &mut W) -> Result<Summary> {
        let mut summary = Summary::default();
        for token in tokens {
            let record = self.apply(token);
            summary.actions += 1;
            if record.error.is_some() {
                summary.refused += 1;
            }
            serde_json::to_writer(&mut *out, &record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        summary.final_state = self.tour.state().label();
        tracing::info!(
            message = "demo.replay_done",
            actions = summary.actions,
            refused = summary.refused,
            state = summary.final_state
        );
        Ok(summary)
    }

    fn page_edit(&mut self, token: &ScriptToken, selector: &str, show: bool) -> Record {
        let error = match self.tour.host().query_selector(selector) {
            None => Some(ErrorView {
                kind: "page",
                recovery: None,
                message: format!("no element matches {selector:?}"),
            }),
            Some(id) if show => {
                if let Some(rect) = self.hidden.remove(selector) {
                    self.tour.host_mut().set_rect(id, Some(rect));
                }
                None
            }
            Some(id) => {
                if let Some(rect) = self.tour.host().bounding_rect(id) {
                    self.hidden.insert(selector.to_string(), rect);
                }
                self.tour.host_mut().set_rect(id, None);
                None
            }
        };
        self.record(token, None, error)
    }

    fn record(
        &self,
        token: &ScriptToken,
        transition: Option<String>,
        error: Option<ErrorView>,
    ) -> Record {
        let state = self.tour.state();
        let (view, error) = match (state, error) {
            (TourState::Active(index), None) => match self.view(index) {
                Ok(view) => (Some(view), None),
                Err(err) => (None, Some(ErrorView::from(err))),
            },
            (_, error) => (None, error),
        };
        Record {
            seq: self.seq,
            action: token.to_string(),
            transition,
            state: state.label(),
            view,
            error,
        }
    }

    fn view(&self, index: usize) -> std::result::Result<StepView, Error> {
        let modal = self.tour.modal_state()?;
        let layout = modal.layout(self.modal);
        let content = modal.content();
        Ok(StepView {
            index,
            label: modal.step_label(),
            title: modal.title().to_string(),
            content: content.as_str().to_string(),
            markup: content.is_markup(),
            anchored: modal.target.is_anchored(),
            closable: modal.closable,
            buttons: modal.buttons(),
            modal: layout.modal,
            placement: layout.placement,
            flipped: layout.flipped,
            arrow: layout.arrow.map(|a| ArrowView {
                edge: a.edge.as_str(),
                x: a.x,
                y: a.y,
            }),
            hotspot: layout.hotspot,
            mask: layout.mask,
        })
    }
}

#[cfg(test)]
mod tests {
    use tourguide::{Guide, MissingTarget, Step};

    use super::*;
    use crate::script::parse_script;

    fn host() -> StaticHost {
        StaticHost::new(Rect::from_size(1000, 800))
            .with_element("#a", Rect::new(100, 100, 100, 40))
            .with_element("#b", Rect::new(500, 600, 100, 40))
    }

    fn replay(guide: Guide) -> Replay {
        Replay::new(TourController::new(guide, host()), Size::new(240, 120))
    }

    #[test]
    fn records_each_action() {
        let mut r = replay(Guide::new(vec![
            Step::at("#a").title("First"),
            Step::at("#b").title("Second"),
        ]));
        let mut out = Vec::new();
        let tokens = parse_script("start next next").unwrap();
        let summary = r.run(&tokens, &mut out).unwrap();
        assert_eq!(summary.actions, 3);
        assert_eq!(summary.refused, 0);
        assert_eq!(summary.final_state, "completed");

        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["transition"], "started:0");
        assert_eq!(lines[0]["view"]["title"], "First");
        assert_eq!(lines[1]["transition"], "moved:0->1");
        assert_eq!(lines[1]["view"]["closable"], true);
        assert_eq!(lines[2]["state"], "completed");
        assert!(lines[2].get("view").is_none());
    }

    #[test]
    fn refusals_carry_recovery() {
        let mut r = replay(Guide::new(vec![Step::at("#a"), Step::at("#b")]).closable(false));
        r.apply(&ScriptToken::Start);
        let rec = r.apply(&ScriptToken::Nav(tourguide::NavAction::Close));
        let err = rec.error.unwrap();
        assert_eq!(err.kind, "tour");
        assert_eq!(err.recovery.as_deref(), Some("stay_on_step"));
        assert!(rec.view.is_none());
        assert_eq!(rec.state, "active");
    }

    #[test]
    fn hiding_the_target_unanchors_the_step() {
        let mut r = replay(Guide::new(vec![Step::at("#a").title("A")]).arrow(true));
        let anchored = r.apply(&ScriptToken::Start).view.unwrap();
        assert!(anchored.anchored);
        assert!(anchored.arrow.is_some());

        let hidden = r.apply(&ScriptToken::Hide("#a".into())).view.unwrap();
        assert!(!hidden.anchored);
        assert!(hidden.arrow.is_none());
        assert_eq!(hidden.modal, Rect::new(380, 340, 240, 120));

        let shown = r.apply(&ScriptToken::Show("#a".into())).view.unwrap();
        assert!(shown.anchored);
    }

    #[test]
    fn hidden_target_under_skip_policy_reports_error() {
        let mut r = replay(
            Guide::new(vec![Step::at("#a"), Step::at("#b")]).missing_target(MissingTarget::Skip),
        );
        r.apply(&ScriptToken::Start);
        let rec = r.apply(&ScriptToken::Hide("#a".into()));
        assert_eq!(rec.error.unwrap().recovery.as_deref(), Some("skip"));

        let rec = r.apply(&ScriptToken::Hide("#zzz".into()));
        assert_eq!(rec.error.unwrap().kind, "page");
    }
}
