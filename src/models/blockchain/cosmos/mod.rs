//! Cosmos Hub LCD payload shapes.

mod account;
mod governance;
mod validator;

pub use account::CosmosDelegation;
pub use governance::{CosmosProposal, CosmosProposalContent, CosmosTallyResult};
pub use validator::{
	CosmosSigningInfo, CosmosValidator, CosmosValidatorCommission, CosmosValidatorDescription,
};
