//! Definitions of the `TokenManager` functions called by the scripts

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use alloy_sol_types::sol;

sol! {
    function initialize(address[] memory _signers) external;
    function minAuthorizations() external view returns (uint256);
    function signersLength() external view returns (uint256);
    function signers(uint256 index) external view returns (address);
}
