// JD analysis pipeline: sanitize → extract → corpus → coverage → suggestions.
// The extractor is the only async piece; everything else is pure.

pub mod corpus;
pub mod coverage;
pub mod extractor;
pub mod sanitize;
pub mod similarity;
pub mod suggestions;
