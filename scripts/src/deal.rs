//! Construction of deal proposals and decoding of deal statuses for the `DealClient` contract

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use alloy::{
    primitives::{Address, U256},
    transports::http::reqwest::Url,
};
use cid::Cid;

use crate::{
    cli::CreateDealArgs,
    constants::EXTRA_PARAMS_VERSION,
    errors::ScriptError,
    solidity::DealClient::{DealRequest, ExtraParamsV1},
};

/// The lifecycle of a piece as tracked by the `DealClient` contract
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DealStatus {
    /// No deal has been proposed for the piece
    None,
    /// A deal proposal has been submitted
    RequestSubmitted,
    /// The storage provider published the deal
    DealPublished,
    /// The deal is active on chain
    DealActivated,
    /// The deal was terminated
    DealTerminated,
}

impl TryFrom<u8> for DealStatus {
    type Error = ScriptError;

    fn try_from(status: u8) -> Result<Self, Self::Error> {
        match status {
            0 => Ok(DealStatus::None),
            1 => Ok(DealStatus::RequestSubmitted),
            2 => Ok(DealStatus::DealPublished),
            3 => Ok(DealStatus::DealActivated),
            4 => Ok(DealStatus::DealTerminated),
            _ => Err(ScriptError::ContractInteraction(format!(
                "unknown deal status {status}"
            ))),
        }
    }
}

impl Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealStatus::None => write!(f, "None"),
            DealStatus::RequestSubmitted => write!(f, "RequestSubmitted"),
            DealStatus::DealPublished => write!(f, "DealPublished"),
            DealStatus::DealActivated => write!(f, "DealActivated"),
            DealStatus::DealTerminated => write!(f, "DealTerminated"),
        }
    }
}

/// Parses a `DealClient` contract address given in hex
pub fn parse_contract_address(contract: &str) -> Result<Address, ScriptError> {
    Address::from_str(contract)
        .map_err(|_| ScriptError::InvalidArgument("contract is not an ETH address".to_string()))
}

/// Parses a CIDv0 or CIDv1 given in its text form
pub fn parse_cid(cid: &str) -> Result<Cid, ScriptError> {
    Cid::try_from(cid).map_err(|e| ScriptError::InvalidArgument(format!("invalid CID {cid}: {e}")))
}

/// Builds the `makeDealProposal` request from the command line arguments.
///
/// Prices and collaterals are zero: the `DealClient` pays nothing up front and
/// leaves the terms to the storage provider.
pub fn build_deal_request(args: &CreateDealArgs) -> Result<DealRequest, ScriptError> {
    let piece_cid = parse_cid(&args.piece_cid)?;
    // Only validated, the label keeps the text as given
    parse_cid(&args.payload_cid)?;

    Url::parse(&args.location_ref).map_err(|e| {
        ScriptError::InvalidArgument(format!("invalid location ref {}: {e}", args.location_ref))
    })?;

    if args.start_epoch >= args.end_epoch {
        return Err(ScriptError::InvalidArgument(format!(
            "start epoch {} must be before end epoch {}",
            args.start_epoch, args.end_epoch
        )));
    }

    Ok(DealRequest {
        piece_cid: piece_cid.to_bytes().into(),
        piece_size: args.piece_size,
        verified_deal: args.verified,
        label: args.payload_cid.clone(),
        start_epoch: args.start_epoch,
        end_epoch: args.end_epoch,
        storage_price_per_epoch: U256::ZERO,
        provider_collateral: U256::ZERO,
        client_collateral: U256::ZERO,
        extra_params_version: EXTRA_PARAMS_VERSION,
        extra_params: ExtraParamsV1 {
            location_ref: args.location_ref.clone(),
            car_size: args.car_size,
            skip_ipni_announce: false,
            remove_unsealed_copy: false,
        },
    })
}
