use anchor_lang::prelude::*;

use crate::error::RaffleError;

// 8 discriminator + 32 raffle + 1 bump + 8 record count + 8 total entries
pub const ENTRY_LEDGER_HEADER_SIZE: usize = 8 + 32 + 1 + 8 + 8;
// 32 participant + 8 start + 8 end
pub const ENTRY_RECORD_SIZE: usize = 32 + 8 + 8;

/// Contiguous block of entries `[start, end)` bought in one purchase.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct EntryRecord {
    pub participant: Pubkey,
    pub start: u64,
    pub end: u64,
}

impl EntryRecord {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Header of the append-only record of every purchase in a raffle.
///
/// Only the header is deserialized. Records live in fixed-width slots right after
/// it in the account data, in purchase order, and their ranges tile `[0, total)`
/// without gaps. Lookups read the slots they need in place, so loading the ledger
/// costs the same whether it holds ten records or ten thousand. The account grows
/// by `ENTRY_RECORD_SIZE` per record.
#[account]
#[derive(Debug)]
pub struct EntryLedger {
    pub raffle: Pubkey,
    pub bump: u8,
    pub record_count: u64,
    pub total_entries: u64,
}

impl EntryLedger {
    pub fn new(raffle: Pubkey, bump: u8) -> Self {
        Self {
            raffle,
            bump,
            record_count: 0,
            total_entries: 0,
        }
    }

    /// Bytes taken by `records` slots.
    pub fn slots_size(records: usize) -> usize {
        records * ENTRY_RECORD_SIZE
    }

    pub fn space_for(records: usize) -> usize {
        ENTRY_LEDGER_HEADER_SIZE + Self::slots_size(records)
    }

    /// Read view over the slots, which start at `ENTRY_LEDGER_HEADER_SIZE` in the account data.
    pub fn records<'a>(&'a self, slots: &'a [u8]) -> Result<EntryRecords<'a>> {
        require!(
            slots.len() >= Self::slots_size(self.record_count as usize),
            RaffleError::EntryLedgerFull
        );
        Ok(EntryRecords {
            ledger: self,
            slots,
        })
    }

    /// Writes the next record into its slot. The slot must already be allocated.
    pub fn append(
        &mut self,
        slots: &mut [u8],
        participant: Pubkey,
        entries: u64,
    ) -> Result<EntryRecord> {
        require!(entries > 0, RaffleError::InvalidCount);
        let start = self.total_entries;
        let end = start.checked_add(entries).ok_or(RaffleError::Overflow)?;
        let record = EntryRecord {
            participant,
            start,
            end,
        };

        let offset = Self::slots_size(self.record_count as usize);
        let mut slot = slots
            .get_mut(offset..offset + ENTRY_RECORD_SIZE)
            .ok_or(RaffleError::EntryLedgerFull)?;
        record
            .serialize(&mut slot)
            .map_err(|_| RaffleError::EntryLedgerFull)?;

        self.record_count = self
            .record_count
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        self.total_entries = end;
        Ok(record)
    }
}

/// Borrowed records of an [`EntryLedger`].
#[derive(Clone, Copy, Debug)]
pub struct EntryRecords<'a> {
    ledger: &'a EntryLedger,
    slots: &'a [u8],
}

impl<'a> EntryRecords<'a> {
    pub fn len(&self) -> usize {
        self.ledger.record_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.record_count == 0
    }

    pub fn total_entries(&self) -> u64 {
        self.ledger.total_entries
    }

    pub fn get(&self, position: usize) -> Option<EntryRecord> {
        if position >= self.len() {
            return None;
        }
        let offset = EntryLedger::slots_size(position);
        let mut slot = self.slots.get(offset..offset + ENTRY_RECORD_SIZE)?;
        EntryRecord::deserialize(&mut slot).ok()
    }

    /// Owner of entry number `index`, O(log purchases) slot reads.
    pub fn owner_at(&self, index: u64) -> Result<Pubkey> {
        require!(index < self.total_entries(), RaffleError::InvalidIndex);
        let (mut low, mut high) = (0, self.len());
        while low < high {
            let mid = low + (high - low) / 2;
            let record = self.get(mid).ok_or(RaffleError::InvalidIndex)?;
            if record.end <= index {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        let record = self.get(low).ok_or(RaffleError::InvalidIndex)?;
        Ok(record.participant)
    }

    pub fn iter(self) -> impl Iterator<Item = EntryRecord> + 'a {
        (0..self.len()).filter_map(move |position| self.get(position))
    }

    pub fn entries_of(self, participant: Pubkey) -> impl Iterator<Item = EntryRecord> + 'a {
        self.iter()
            .filter(move |record| record.participant == participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::error_code;

    fn ledger_with(purchases: &[(Pubkey, u64)]) -> (EntryLedger, Vec<u8>) {
        let mut ledger = EntryLedger::new(Pubkey::new_unique(), 1);
        let mut slots = vec![0u8; EntryLedger::slots_size(purchases.len())];
        for (participant, entries) in purchases {
            ledger.append(&mut slots, *participant, *entries).unwrap();
        }
        (ledger, slots)
    }

    #[test]
    fn owner_at_resolves_range_boundaries() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let (ledger, slots) = ledger_with(&[(alice, 240), (bob, 260), (alice, 1)]);
        let records = ledger.records(&slots).unwrap();

        assert_eq!(records.total_entries(), 501);
        assert_eq!(records.owner_at(0).unwrap(), alice);
        assert_eq!(records.owner_at(239).unwrap(), alice);
        assert_eq!(records.owner_at(240).unwrap(), bob);
        assert_eq!(records.owner_at(499).unwrap(), bob);
        assert_eq!(records.owner_at(500).unwrap(), alice);
        assert_eq!(
            error_code(records.owner_at(501).unwrap_err()),
            u32::from(RaffleError::InvalidIndex)
        );
    }

    #[test]
    fn records_tile_the_counter_without_gaps() {
        let purchases: Vec<(Pubkey, u64)> = (0..6)
            .map(|i| (Pubkey::new_unique(), (i + 1) * 10))
            .collect();
        let (ledger, slots) = ledger_with(&purchases);
        let records = ledger.records(&slots).unwrap();
        let stored: Vec<EntryRecord> = records.iter().collect();

        assert_eq!(stored.len(), 6);
        assert_eq!(stored[0].start, 0);
        for pair in stored.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for record in &stored {
            for index in record.start..record.end {
                assert_eq!(records.owner_at(index).unwrap(), record.participant);
            }
        }
    }

    #[test]
    fn entries_of_lists_a_participants_purchases_in_order() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let (ledger, slots) = ledger_with(&[(alice, 10), (bob, 20), (alice, 30)]);
        let records = ledger.records(&slots).unwrap();

        let ranges: Vec<(u64, u64)> = records
            .entries_of(alice)
            .map(|record| (record.start, record.end))
            .collect();
        assert_eq!(ranges, vec![(0, 10), (30, 60)]);
        assert_eq!(records.entries_of(bob).map(|record| record.len()).sum::<u64>(), 20);
    }

    #[test]
    fn empty_ledger_has_no_owner() {
        let (ledger, slots) = ledger_with(&[]);
        let records = ledger.records(&slots).unwrap();
        assert_eq!(records.total_entries(), 0);
        assert!(records.is_empty());
        assert!(records.owner_at(0).is_err());
        assert_eq!(
            EntryLedger::space_for(2),
            ENTRY_LEDGER_HEADER_SIZE + 2 * ENTRY_RECORD_SIZE
        );
    }

    #[test]
    fn append_needs_an_allocated_slot() {
        let mut ledger = EntryLedger::new(Pubkey::new_unique(), 1);
        let mut slots = vec![0u8; EntryLedger::slots_size(1)];
        ledger.append(&mut slots, Pubkey::new_unique(), 5).unwrap();
        assert_eq!(
            error_code(
                ledger
                    .append(&mut slots, Pubkey::new_unique(), 5)
                    .unwrap_err()
            ),
            u32::from(RaffleError::EntryLedgerFull)
        );
        assert_eq!(ledger.record_count, 1);
        assert_eq!(ledger.total_entries, 5);
        assert_eq!(
            error_code(ledger.append(&mut slots, Pubkey::new_unique(), 0).unwrap_err()),
            u32::from(RaffleError::InvalidCount)
        );
    }

    #[test]
    fn header_loads_without_reading_the_records() {
        let raffle = Pubkey::new_unique();
        let mut ledger = EntryLedger::new(raffle, 7);
        let mut data = Vec::new();
        ledger.try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), ENTRY_LEDGER_HEADER_SIZE);

        let purchases = 5_000;
        data.resize(EntryLedger::space_for(purchases), 0);
        let buyers: Vec<Pubkey> = (0..16).map(|_| Pubkey::new_unique()).collect();
        for i in 0..purchases {
            let slots = &mut data[ENTRY_LEDGER_HEADER_SIZE..];
            ledger
                .append(slots, buyers[i % buyers.len()], (i % 3 + 1) as u64)
                .unwrap();
        }
        let mut header = &mut data[..ENTRY_LEDGER_HEADER_SIZE];
        ledger.try_serialize(&mut header).unwrap();

        let loaded = EntryLedger::try_deserialize(&mut data.as_slice()).unwrap();
        assert_eq!(loaded.raffle, raffle);
        assert_eq!(loaded.record_count, purchases as u64);
        assert_eq!(loaded.total_entries, 10_000 - 1);

        let records = loaded.records(&data[ENTRY_LEDGER_HEADER_SIZE..]).unwrap();
        let last = records.get(purchases - 1).unwrap();
        assert_eq!(last.end, loaded.total_entries);
        assert_eq!(records.owner_at(last.start).unwrap(), last.participant);
        assert_eq!(records.owner_at(0).unwrap(), buyers[0]);
        assert_eq!(
            error_code(loaded.records(&data[ENTRY_LEDGER_HEADER_SIZE + 1..]).unwrap_err()),
            u32::from(RaffleError::EntryLedgerFull)
        );
    }
}
