use thiserror::Error;

use crate::model::games::QuestionError;
use crate::model::progress::ProgressDataError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Progress(#[from] ProgressDataError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}
