//! Definitions of the `DealClient` Solidity interface used by the deal commands

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface DealClient {
        #[derive(Debug, PartialEq, Eq)]
        struct ExtraParamsV1 {
            string location_ref;
            uint64 car_size;
            bool skip_ipni_announce;
            bool remove_unsealed_copy;
        }

        #[derive(Debug, PartialEq, Eq)]
        struct DealRequest {
            bytes piece_cid;
            uint64 piece_size;
            bool verified_deal;
            string label;
            int64 start_epoch;
            int64 end_epoch;
            uint256 storage_price_per_epoch;
            uint256 provider_collateral;
            uint256 client_collateral;
            uint64 extra_params_version;
            ExtraParamsV1 extra_params;
        }

        function makeDealProposal(DealRequest calldata deal) external returns (bytes32);
        function pieceStatus(bytes calldata piece_cid) external view returns (uint8);
    }
}
