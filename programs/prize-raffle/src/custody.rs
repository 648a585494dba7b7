use std::slice::Iter;

use anchor_lang::{prelude::*, system_program};
use anchor_spl::token_interface::{self, Mint, TokenAccount, TransferChecked};

use crate::{
    error::RaffleError,
    state::{Prize, Treasury, TREASURY_ACCOUNT_SIZE},
};

pub const TREASURY_SEED: &[u8] = b"treasury";

/// Executes asset movements decided by the raffle core.
///
/// The core only says what moves and to whom; implementations decide how.
pub trait AssetCustodian {
    /// Moves `asset` from `from` into raffle custody.
    fn lock(&mut self, asset: &Prize, from: &Pubkey) -> Result<()>;

    /// Moves `asset` out of raffle custody to `to`.
    fn release(&mut self, asset: &Prize, to: &Pubkey) -> Result<()>;

    /// Lamports held for the raffle, excluding rent.
    fn balance_held(&self) -> Result<u64>;
}

struct TokenLeg<'info> {
    mint: AccountInfo<'info>,
    counterparty: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    decimals: u8,
}

/// Custodian backed by the raffle treasury PDA.
///
/// Native assets move as lamports between the counterparty and the treasury. Token
/// assets consume `remaining_accounts` in triples of
/// `[mint, counterparty token account, vault token account]`, one triple per token
/// prize in tier order. Vaults must be token accounts owned by the treasury.
/// Instructions that only move lamports pass no token program.
pub struct ProgramCustodian<'a, 'info> {
    raffle: Pubkey,
    bump: [u8; 1],
    treasury: AccountInfo<'info>,
    counterparty: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
    token_program: Option<AccountInfo<'info>>,
    token_accounts: Iter<'a, AccountInfo<'info>>,
}

impl<'a, 'info> ProgramCustodian<'a, 'info> {
    pub fn new(
        raffle: Pubkey,
        treasury: &Account<'info, Treasury>,
        counterparty: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
        token_program: Option<AccountInfo<'info>>,
        token_accounts: &'a [AccountInfo<'info>],
    ) -> Self {
        Self {
            raffle,
            bump: [treasury.bump],
            treasury: treasury.to_account_info(),
            counterparty,
            system_program,
            token_program,
            token_accounts: token_accounts.iter(),
        }
    }

    fn next_account(&mut self) -> Result<AccountInfo<'info>> {
        self.token_accounts
            .next()
            .cloned()
            .ok_or_else(|| error!(RaffleError::InvalidPrizeAccount))
    }

    fn token_program(&self) -> Result<AccountInfo<'info>> {
        self.token_program
            .clone()
            .ok_or_else(|| error!(RaffleError::InvalidPrizeAccount))
    }

    fn next_token_leg(&mut self, asset: &Prize) -> Result<TokenLeg<'info>> {
        let token_program = self.token_program()?.key();
        let mint = self.next_account()?;
        let counterparty = self.next_account()?;
        let vault = self.next_account()?;

        require_keys_eq!(mint.key(), asset.mint, RaffleError::InvalidPrizeAccount);
        require_keys_eq!(
            *mint.owner,
            token_program,
            RaffleError::InvalidPrizeAccount
        );
        let decimals = {
            let data = mint.try_borrow_data()?;
            Mint::try_deserialize(&mut &data[..])?.decimals
        };

        let counterparty_owner =
            self.token_account_owner(&counterparty, &asset.mint, &token_program)?;
        require_keys_eq!(
            counterparty_owner,
            self.counterparty.key(),
            RaffleError::InvalidPrizeAccount
        );
        let vault_owner = self.token_account_owner(&vault, &asset.mint, &token_program)?;
        require_keys_eq!(
            vault_owner,
            self.treasury.key(),
            RaffleError::InvalidPrizeAccount
        );

        Ok(TokenLeg {
            mint,
            counterparty,
            vault,
            decimals,
        })
    }

    fn token_account_owner(
        &self,
        account: &AccountInfo<'info>,
        mint: &Pubkey,
        token_program: &Pubkey,
    ) -> Result<Pubkey> {
        require_keys_eq!(
            *account.owner,
            *token_program,
            RaffleError::InvalidPrizeAccount
        );
        let data = account.try_borrow_data()?;
        let token_account = TokenAccount::try_deserialize(&mut &data[..])?;
        require_keys_eq!(token_account.mint, *mint, RaffleError::InvalidPrizeAccount);
        Ok(token_account.owner)
    }
}

impl<'a, 'info> AssetCustodian for ProgramCustodian<'a, 'info> {
    fn lock(&mut self, asset: &Prize, from: &Pubkey) -> Result<()> {
        require_keys_eq!(self.counterparty.key(), *from, RaffleError::OwnerMismatch);

        if asset.is_native() {
            return system_program::transfer(
                CpiContext::new(
                    self.system_program.clone(),
                    system_program::Transfer {
                        from: self.counterparty.clone(),
                        to: self.treasury.clone(),
                    },
                ),
                asset.amount,
            );
        }

        let leg = self.next_token_leg(asset)?;
        token_interface::transfer_checked(
            CpiContext::new(
                self.token_program()?,
                TransferChecked {
                    from: leg.counterparty,
                    mint: leg.mint,
                    to: leg.vault,
                    authority: self.counterparty.clone(),
                },
            ),
            asset.amount,
            leg.decimals,
        )
    }

    fn release(&mut self, asset: &Prize, to: &Pubkey) -> Result<()> {
        require_keys_eq!(self.counterparty.key(), *to, RaffleError::OwnerMismatch);

        if asset.is_native() {
            // The treasury is owned by this program, so lamports can be moved directly
            self.treasury.sub_lamports(asset.amount)?;
            self.counterparty.add_lamports(asset.amount)?;
            return Ok(());
        }

        let leg = self.next_token_leg(asset)?;
        let seeds: &[&[u8]] = &[TREASURY_SEED, self.raffle.as_ref(), &self.bump];
        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program()?,
                TransferChecked {
                    from: leg.vault,
                    mint: leg.mint,
                    to: leg.counterparty,
                    authority: self.treasury.clone(),
                },
                &[seeds],
            ),
            asset.amount,
            leg.decimals,
        )
    }

    fn balance_held(&self) -> Result<u64> {
        let rent_lamports = Rent::get()?.minimum_balance(TREASURY_ACCOUNT_SIZE);
        Ok(self.treasury.lamports().saturating_sub(rent_lamports))
    }
}
