/// The bracket oracle was asked about something that is not a basis element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BracketError {
    #[error("{generator} is not a basis element of {algebra}")]
    UnknownGenerator { generator: String, algebra: String },
    #[error("the bracket of {lhs} and {rhs} is out of range in {algebra}")]
    IndexOverflow {
        lhs: String,
        rhs: String,
        algebra: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("{generator} does not act on {module}")]
    UnknownGenerator { generator: String, module: String },
    #[error("{element} is not a basis element of {module}")]
    UnknownBasisElement { element: String, module: String },
    #[error(transparent)]
    Bracket(#[from] BracketError),
}

#[derive(Debug)]
pub struct JacobiFailedError {
    pub relation: String,
    pub value: String,
}

impl std::fmt::Display for JacobiFailedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Jacobi identity failed:\n    {}  !=  0\nInstead it is equal to {}\n",
            &self.relation, &self.value
        )
    }
}

impl std::error::Error for JacobiFailedError {}

#[derive(Debug)]
pub struct RepresentationFailedRelationError {
    pub relation: String,
    pub value: String,
}

impl std::fmt::Display for RepresentationFailedRelationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Relation failed:\n    {}  !=  0\nInstead it is equal to {}\n",
            &self.relation, &self.value
        )
    }
}

impl std::error::Error for RepresentationFailedRelationError {}
