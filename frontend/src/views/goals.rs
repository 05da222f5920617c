use crate::api::{ApiClient, Transport};
use crate::error::{AppError, RequestError};
use crate::model::{Goal, GoalPatch, NewGoal};
use crate::validate;
use crate::views::summary::Period;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDraft {
    pub amount: String,
    pub period: Period,
    pub description: String,
}

impl GoalDraft {
    pub fn validate(&self) -> Result<NewGoal, AppError> {
        let amount = validate::positive_amount(&self.amount)?;
        let month = validate::month(self.period.month)?;
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Ok(NewGoal {
            amount,
            month,
            year: self.period.year,
            description,
        })
    }
}

pub async fn load<T: Transport>(api: &ApiClient<T>) -> Result<Vec<Goal>, RequestError> {
    api.list_goals().await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalListAction {
    Loaded(Vec<Goal>),
    Added(Goal),
    Replaced(Goal),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalList {
    pub goals: Vec<Goal>,
}

impl GoalList {
    pub fn apply(&self, action: GoalListAction) -> Self {
        let goals = match action {
            GoalListAction::Loaded(goals) => goals,
            GoalListAction::Added(goal) => {
                let mut goals = self.goals.clone();
                goals.push(goal);
                goals
            }
            GoalListAction::Replaced(goal) => replace(&self.goals, goal),
        };
        Self { goals }
    }
}

/// Creates a goal; the server's copy is appended when the action is applied.
pub async fn create<T: Transport>(api: &ApiClient<T>, draft: &GoalDraft) -> Result<GoalListAction, AppError> {
    let goal = draft.validate()?;
    let created = api.create_goal(&goal).await?;
    Ok(GoalListAction::Added(created))
}

/// Changes only the amount of goal `id`; the server's response replaces the
/// old entry.
pub async fn update_amount<T: Transport>(
    api: &ApiClient<T>,
    id: i64,
    amount: &str,
) -> Result<GoalListAction, AppError> {
    let amount = validate::positive_amount(amount)?;
    let patch = GoalPatch {
        amount: Some(amount),
        ..GoalPatch::default()
    };
    let updated = api.update_goal(id, &patch).await?;
    Ok(GoalListAction::Replaced(updated))
}

pub fn replace(goals: &[Goal], updated: Goal) -> Vec<Goal> {
    goals
        .iter()
        .map(|g| if g.id == updated.id { updated.clone() } else { g.clone() })
        .collect()
}
