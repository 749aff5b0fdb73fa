use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "Option<String>", into = "String")]
pub enum CaseReviewStatus {
    #[default]
    InReview,
    Uncertain,
    Accepted,
    NotAccepted,
    MoreInfoNeeded,
    PendingResultsAndRecords,
    Waitlist,
}

pub fn case_review_status_order() -> &'static [CaseReviewStatus] {
    &[
        CaseReviewStatus::InReview,
        CaseReviewStatus::Uncertain,
        CaseReviewStatus::Accepted,
        CaseReviewStatus::NotAccepted,
        CaseReviewStatus::MoreInfoNeeded,
        CaseReviewStatus::PendingResultsAndRecords,
        CaseReviewStatus::Waitlist,
    ]
}

impl CaseReviewStatus {
    pub fn code(self) -> &'static str {
        match self {
            CaseReviewStatus::InReview => "I",
            CaseReviewStatus::Uncertain => "U",
            CaseReviewStatus::Accepted => "A",
            CaseReviewStatus::NotAccepted => "R",
            CaseReviewStatus::MoreInfoNeeded => "Q",
            CaseReviewStatus::PendingResultsAndRecords => "P",
            CaseReviewStatus::Waitlist => "W",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CaseReviewStatus::InReview => "In Review",
            CaseReviewStatus::Uncertain => "Uncertain",
            CaseReviewStatus::Accepted => "Accepted",
            CaseReviewStatus::NotAccepted => "Not Accepted",
            CaseReviewStatus::MoreInfoNeeded => "More Info Needed",
            CaseReviewStatus::PendingResultsAndRecords => "Pending Results and Records",
            CaseReviewStatus::Waitlist => "Waitlist",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            CaseReviewStatus::InReview => "#2196F3",
            CaseReviewStatus::Uncertain => "#fddb28",
            CaseReviewStatus::Accepted => "#8BC34A",
            CaseReviewStatus::NotAccepted => "#4f5cb3",
            CaseReviewStatus::MoreInfoNeeded => "#F44336",
            CaseReviewStatus::PendingResultsAndRecords => "#996699",
            CaseReviewStatus::Waitlist => "#990099",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        case_review_status_order()
            .iter()
            .copied()
            .find(|s| s.code() == code)
    }
}

impl From<String> for CaseReviewStatus {
    fn from(code: String) -> Self {
        CaseReviewStatus::from_code(&code).unwrap_or_else(|| {
            tracing::warn!(code = %code, "unknown case review status; treating as In Review");
            CaseReviewStatus::default()
        })
    }
}

impl From<Option<String>> for CaseReviewStatus {
    /// `null` takes the same path as an unknown code.
    fn from(code: Option<String>) -> Self {
        CaseReviewStatus::from(code.unwrap_or_default())
    }
}

impl From<CaseReviewStatus> for String {
    fn from(status: CaseReviewStatus) -> Self {
        status.code().to_string()
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "Option<String>", into = "String")]
pub enum AnalysisStatus {
    Solved,
    SolvedKnownGeneKnownPhenotype,
    SolvedKnownGeneDifferentPhenotype,
    SolvedNovelGene,
    StrongCandidateKnownGeneKnownPhenotype,
    StrongCandidateKnownGeneDifferentPhenotype,
    StrongCandidateNovelGene,
    ReviewedPursuingCandidates,
    ReviewedNoClearCandidate,
    AnalysisInProgress,
    #[default]
    WaitingForData,
}

pub fn analysis_status_order() -> &'static [AnalysisStatus] {
    &[
        AnalysisStatus::Solved,
        AnalysisStatus::SolvedKnownGeneKnownPhenotype,
        AnalysisStatus::SolvedKnownGeneDifferentPhenotype,
        AnalysisStatus::SolvedNovelGene,
        AnalysisStatus::StrongCandidateKnownGeneKnownPhenotype,
        AnalysisStatus::StrongCandidateKnownGeneDifferentPhenotype,
        AnalysisStatus::StrongCandidateNovelGene,
        AnalysisStatus::ReviewedPursuingCandidates,
        AnalysisStatus::ReviewedNoClearCandidate,
        AnalysisStatus::AnalysisInProgress,
        AnalysisStatus::WaitingForData,
    ]
}

impl AnalysisStatus {
    pub fn code(self) -> &'static str {
        match self {
            AnalysisStatus::Solved => "S",
            AnalysisStatus::SolvedKnownGeneKnownPhenotype => "S_kgfp",
            AnalysisStatus::SolvedKnownGeneDifferentPhenotype => "S_kgdp",
            AnalysisStatus::SolvedNovelGene => "S_ng",
            AnalysisStatus::StrongCandidateKnownGeneKnownPhenotype => "Sc_kgfp",
            AnalysisStatus::StrongCandidateKnownGeneDifferentPhenotype => "Sc_kgdp",
            AnalysisStatus::StrongCandidateNovelGene => "Sc_ng",
            AnalysisStatus::ReviewedPursuingCandidates => "Rcpc",
            AnalysisStatus::ReviewedNoClearCandidate => "Rncc",
            AnalysisStatus::AnalysisInProgress => "I",
            AnalysisStatus::WaitingForData => "Q",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnalysisStatus::Solved => "Solved",
            AnalysisStatus::SolvedKnownGeneKnownPhenotype => "Solved - known gene for phenotype",
            AnalysisStatus::SolvedKnownGeneDifferentPhenotype => {
                "Solved - gene linked to different phenotype"
            }
            AnalysisStatus::SolvedNovelGene => "Solved - novel gene",
            AnalysisStatus::StrongCandidateKnownGeneKnownPhenotype => {
                "Strong candidate - known gene for phenotype"
            }
            AnalysisStatus::StrongCandidateKnownGeneDifferentPhenotype => {
                "Strong candidate - gene linked to different phenotype"
            }
            AnalysisStatus::StrongCandidateNovelGene => "Strong candidate - novel gene",
            AnalysisStatus::ReviewedPursuingCandidates => "Reviewed, currently pursuing candidates",
            AnalysisStatus::ReviewedNoClearCandidate => "Reviewed, no clear candidate",
            AnalysisStatus::AnalysisInProgress => "Analysis in Progress",
            AnalysisStatus::WaitingForData => "Waiting for data",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            AnalysisStatus::Solved
            | AnalysisStatus::SolvedKnownGeneKnownPhenotype
            | AnalysisStatus::SolvedKnownGeneDifferentPhenotype
            | AnalysisStatus::SolvedNovelGene => "#4CAF50",
            AnalysisStatus::StrongCandidateKnownGeneKnownPhenotype
            | AnalysisStatus::StrongCandidateKnownGeneDifferentPhenotype
            | AnalysisStatus::StrongCandidateNovelGene => "#CDDC39",
            AnalysisStatus::ReviewedPursuingCandidates => "#CDDC39",
            AnalysisStatus::ReviewedNoClearCandidate => "#EF5350",
            AnalysisStatus::AnalysisInProgress => "#4682B4",
            AnalysisStatus::WaitingForData => "#FFC107",
        }
    }

    pub fn is_solved(self) -> bool {
        matches!(
            self,
            AnalysisStatus::Solved
                | AnalysisStatus::SolvedKnownGeneKnownPhenotype
                | AnalysisStatus::SolvedKnownGeneDifferentPhenotype
                | AnalysisStatus::SolvedNovelGene
        )
    }

    pub fn is_strong_candidate(self) -> bool {
        matches!(
            self,
            AnalysisStatus::StrongCandidateKnownGeneKnownPhenotype
                | AnalysisStatus::StrongCandidateKnownGeneDifferentPhenotype
                | AnalysisStatus::StrongCandidateNovelGene
        )
    }

    pub fn from_code(code: &str) -> Option<Self> {
        analysis_status_order()
            .iter()
            .copied()
            .find(|s| s.code() == code)
    }

    /// Position in the registry; used as the sort key for status columns.
    pub fn rank(self) -> usize {
        analysis_status_order()
            .iter()
            .position(|s| *s == self)
            .unwrap_or(0)
    }
}

impl From<String> for AnalysisStatus {
    fn from(code: String) -> Self {
        AnalysisStatus::from_code(&code).unwrap_or_else(|| {
            tracing::warn!(code = %code, "unknown analysis status; treating as Waiting for data");
            AnalysisStatus::default()
        })
    }
}

impl From<Option<String>> for AnalysisStatus {
    /// `null` takes the same path as an unknown code.
    fn from(code: Option<String>) -> Self {
        AnalysisStatus::from(code.unwrap_or_default())
    }
}

impl From<AnalysisStatus> for String {
    fn from(status: AnalysisStatus) -> Self {
        status.code().to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/statuses.rs"]
mod tests;
