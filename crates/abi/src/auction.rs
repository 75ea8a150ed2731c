use alloy::sol;

sol! {
    // ---------- Keeper-facing surface of the auction house ----------

    #[sol(rpc)]
    interface IAuctionHouse {
        error AuctionStillActive();
        error AuctionAlreadyActive();
        error AuctionHasBids();
        error NoWinner();
        error ProofAlreadySubmitted(uint256 tokenId);
        error ProofNotSubmitted(uint256 tokenId);
        error PaymentAlreadyClaimed(uint256 tokenId);
        error InvalidPriceRange(uint256 startPrice, uint256 endPrice);
        error NotOperator(address caller);

        event AuctionStarted(
            uint256 startPrice,
            uint256 endPrice,
            uint256 startTime,
            uint256 endTime
        );
        event AuctionEnded(
            address indexed winner,
            uint256 winningBid,
            uint256 tokenId,
            uint256 timestamp
        );
        event BidPlaced(
            address indexed bidder,
            uint256 amount,
            uint256 tokenId,
            uint256 timestamp
        );
        event ProofSubmitted(uint256 indexed tokenId, bytes32 proofHash, uint256 timestamp);
        event PaymentClaimed(
            address indexed recipient,
            uint256 amount,
            uint256 tokenId,
            uint256 timestamp
        );
        event WinnerSelected(
            address indexed winner,
            uint256 winningBid,
            uint256 tokenId,
            uint256 timestamp
        );

        // Reads. A zero `winner` means the auction closed without bids.
        function getAuctionStatus()
            external
            view
            returns (uint256 currentPrice, bool isActive, uint256 timeRemaining);

        function getWinnerInfo()
            external
            view
            returns (address winner, uint256 winningBid, uint256 winningTokenId);

        function getSettlementState()
            external
            view
            returns (bool proofSubmitted, bool claimed);

        // Operator transitions
        function endAuctionNoBids() external;
        function startAuction(uint256 startPrice, uint256 endPrice) external;
        function submitProof(uint256 tokenId, bytes32 proofHash) external;
        function claimPayment(uint256 tokenId) external;
    }
}
