// src/services/order_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, CrmRepository, OrdersRepository},
    models::orders::Order,
};

/// Linha do pedido já precificada, pronta para persistir.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// total_price = unit_price * quantity, congelado na criação.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// total_amount do pedido = soma dos total_price das linhas.
pub fn order_total(lines: &[PricedLine]) -> Decimal {
    lines.iter().map(|line| line.total_price).sum()
}

// Composição de pedidos: resolve preços vivos, congela os valores
// e grava cabeçalho + itens numa única transação.
#[derive(Clone)]
pub struct OrderService {
    catalog_repo: CatalogRepository,
    crm_repo: CrmRepository,
    orders_repo: OrdersRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(
        catalog_repo: CatalogRepository,
        crm_repo: CrmRepository,
        orders_repo: OrdersRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            catalog_repo,
            crm_repo,
            orders_repo,
            pool,
        }
    }

    /// Monta e persiste um pedido inteiro.
    ///
    /// Qualquer produto ausente (ou de outro usuário) aborta a operação
    /// antes do commit: nenhuma linha de 'orders' nem de 'order_items'
    /// fica para trás. O status nasce 'pending' sempre, via DEFAULT do
    /// banco, ignorando o que o cliente tiver mandado.
    pub async fn create_order(
        &self,
        user_id: &str,
        customer_id: Uuid,
        items: &[(Uuid, i32)],
        notes: Option<&str>,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. O cliente precisa existir e ser do usuário, senão o
        // pedido penduraria o nome/e-mail de um cliente alheio.
        if !self
            .crm_repo
            .customer_exists(&mut *tx, user_id, customer_id)
            .await?
        {
            return Err(AppError::CustomerNotFound(customer_id));
        }

        // 2. Precifica tudo antes de escrever qualquer coisa.
        let mut lines = Vec::with_capacity(items.len());
        for &(product_id, quantity) in items {
            let unit_price = self
                .catalog_repo
                .find_price(&mut *tx, user_id, product_id)
                .await?
                .ok_or(AppError::ProductNotFound(product_id))?;

            lines.push(PricedLine {
                product_id,
                quantity,
                unit_price,
                total_price: line_total(unit_price, quantity),
            });
        }

        let total_amount = order_total(&lines);

        // 3. Cabeçalho e itens na mesma transação.
        let order = self
            .orders_repo
            .insert_order(&mut *tx, user_id, customer_id, total_amount, notes)
            .await?;

        for line in &lines {
            self.orders_repo
                .insert_order_item(
                    &mut *tx,
                    order.id,
                    line.product_id,
                    line.quantity,
                    line.unit_price,
                    line.total_price,
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Pedido {} criado: {} itens, total {}",
            order.id,
            lines.len(),
            total_amount
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(unit_price: Decimal, quantity: i32) -> PricedLine {
        PricedLine {
            product_id: Uuid::new_v4(),
            quantity,
            unit_price,
            total_price: line_total(unit_price, quantity),
        }
    }

    #[test]
    fn linha_multiplica_preco_por_quantidade() {
        // Widget a 10.00, três unidades => 30.00
        let total = line_total(Decimal::new(1000, 2), 3);
        assert_eq!(total, Decimal::new(3000, 2));
    }

    #[test]
    fn linha_preserva_centavos() {
        // 19.99 * 7 = 139.93, sem erro de ponto flutuante
        let total = line_total(Decimal::new(1999, 2), 7);
        assert_eq!(total, Decimal::new(13993, 2));
    }

    #[test]
    fn total_do_pedido_soma_as_linhas() {
        let lines = vec![
            line(Decimal::new(1000, 2), 3),  // 30.00
            line(Decimal::new(550, 2), 2),   // 11.00
            line(Decimal::new(25, 2), 100),  // 25.00
        ];
        assert_eq!(order_total(&lines), Decimal::new(6600, 2));
    }

    #[test]
    fn pedido_sem_linhas_soma_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn quantidade_um_copia_o_preco_unitario() {
        let l = line(Decimal::new(4999, 2), 1);
        assert_eq!(l.total_price, l.unit_price);
    }
}
